//! Integration tests for the PoetryWorld data layer.

use std::time::{Duration, Instant};

use sqlx::{Row, SqlitePool};
use tempfile::TempDir;

use crate::ai::{
    AiService, CompletionTransport, PoemForm, PoemLength, PoemParams, PoemStyle, StubTransport,
};
use crate::auth::{AuthSession, AuthUser};
use crate::controllers::{
    BrowseController, CommentOutcome, FeedController, PoemDetailController, SavedItemsController,
    SavedTab, FEED_PAGE_SIZE,
};
use crate::db::{init_database, ContentStore};
use crate::errors::AppError;
use crate::models::{CreatePoemRequest, Poem};

const READER_ID: &str = "user-reader";

/// Test fixture: a fresh store plus a session, with the reader's profile
/// seeded when signed in.
struct TestFixture {
    store: ContentStore,
    session: AuthSession,
    pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let fixture = Self::signed_out().await;

        fixture.session.sign_in(AuthUser {
            id: READER_ID.to_string(),
            email: Some("reader@example.com".to_string()),
        });
        fixture
            .store
            .upsert_user_profile(READER_ID, "Avid Reader", None)
            .await
            .expect("Failed to seed profile");

        fixture
    }

    async fn signed_out() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let store = ContentStore::new(pool.clone());

        TestFixture {
            store,
            session: AuthSession::signed_out(),
            pool,
            _temp_dir: temp_dir,
        }
    }

    async fn create_poem(&self, title: &str) -> Poem {
        self.store
            .create_poem(&CreatePoemRequest {
                title: title.to_string(),
                content: "Soft rain on the window,\nthe evening folds itself away.".to_string(),
                author: "R. Hollis".to_string(),
                category_id: None,
                theme_id: None,
                tags: Some(vec!["rain".to_string(), "evening".to_string()]),
            })
            .await
            .expect("Failed to create poem")
    }

    async fn count_rows(&self, table: &str) -> i64 {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS n FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows");
        row.get("n")
    }
}

// ==================== FEED ====================

#[tokio::test]
async fn test_feed_loads_newest_first_capped_at_page_size() {
    let fixture = TestFixture::new().await;

    for i in 0..25 {
        fixture.create_poem(&format!("Poem {}", i)).await;
        // Distinct creation timestamps so the ordering is well-defined
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let mut feed = FeedController::new(fixture.store.clone(), fixture.session.clone());
    feed.load_feed().await.expect("Failed to load feed");

    assert_eq!(feed.poems().len(), FEED_PAGE_SIZE as usize);
    assert_eq!(feed.poems()[0].title, "Poem 24");
    for pair in feed.poems().windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn test_feed_refresh_replaces_feed_wholesale() {
    let fixture = TestFixture::new().await;
    fixture.create_poem("First").await;

    let mut feed = FeedController::new(fixture.store.clone(), fixture.session.clone());
    feed.load_feed().await.expect("Failed to load feed");
    assert_eq!(feed.poems().len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    fixture.create_poem("Second").await;

    feed.load_feed().await.expect("Failed to refresh feed");
    assert_eq!(feed.poems().len(), 2);
    assert_eq!(feed.poems()[0].title, "Second");
}

#[tokio::test]
async fn test_feed_failure_leaves_prior_feed_untouched() {
    let fixture = TestFixture::new().await;
    fixture.create_poem("Survivor").await;

    let mut feed = FeedController::new(fixture.store.clone(), fixture.session.clone());
    feed.load_feed().await.expect("Failed to load feed");
    assert_eq!(feed.poems().len(), 1);

    // Sever the backend: subsequent queries fail
    fixture.pool.close().await;

    let err = feed.load_feed().await.expect_err("closed pool must fail");
    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(feed.poems().len(), 1);
    assert_eq!(feed.poems()[0].title, "Survivor");
}

#[tokio::test]
async fn test_feed_toggle_like_pair_is_idempotent() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Toggle Me").await;

    let mut feed = FeedController::new(fixture.store.clone(), fixture.session.clone());
    feed.load_feed().await.expect("Failed to load feed");

    feed.toggle_like(&poem.id).await;
    assert_eq!(feed.poems()[0].likes_count, 1);
    assert!(fixture
        .store
        .like_exists(READER_ID, &poem.id)
        .await
        .expect("Failed to check like"));

    feed.toggle_like(&poem.id).await;
    assert_eq!(feed.poems()[0].likes_count, 0);
    assert!(!fixture
        .store
        .like_exists(READER_ID, &poem.id)
        .await
        .expect("Failed to check like"));
}

#[tokio::test]
async fn test_feed_actions_noop_without_user() {
    let fixture = TestFixture::signed_out().await;
    let poem = fixture.create_poem("Nobody Home").await;

    let mut feed = FeedController::new(fixture.store.clone(), fixture.session.clone());
    feed.load_feed().await.expect("Failed to load feed");

    feed.toggle_like(&poem.id).await;
    feed.toggle_bookmark(&poem.id).await;

    assert_eq!(feed.poems()[0].likes_count, 0);
    assert_eq!(fixture.count_rows("likes").await, 0);
    assert_eq!(fixture.count_rows("bookmarks").await, 0);
}

// ==================== POEM DETAIL ====================

#[tokio::test]
async fn test_detail_not_found_is_an_empty_state() {
    let fixture = TestFixture::new().await;

    let mut detail = PoemDetailController::new(
        fixture.store.clone(),
        fixture.session.clone(),
        "no-such-poem",
    );
    detail.load().await;

    assert!(detail.poem().is_none());
    assert!(detail.comments().is_empty());
    assert!(!detail.liked());
    assert!(!detail.bookmarked());
    assert!(detail.share_text().is_none());
}

#[tokio::test]
async fn test_detail_load_reconciles_existing_social_state() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Already Liked").await;
    fixture
        .store
        .insert_like(READER_ID, &poem.id)
        .await
        .expect("Failed to insert like");

    let mut detail =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    detail.load().await;

    assert!(detail.poem().is_some());
    assert!(detail.liked());
    assert!(!detail.bookmarked());
}

#[tokio::test]
async fn test_detail_view_count_increments_atomically_per_load() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Watched").await;

    let mut first =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    first.load().await;
    // The local copy shows the value as fetched, before the increment
    assert_eq!(first.poem().map(|p| p.views_count), Some(0));

    let mut second =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    second.load().await;
    assert_eq!(second.poem().map(|p| p.views_count), Some(1));

    let stored = fixture
        .store
        .get_poem(&poem.id)
        .await
        .expect("Failed to fetch poem")
        .expect("Poem must exist");
    assert_eq!(stored.views_count, 2);
}

#[tokio::test]
async fn test_detail_toggle_like_pair_restores_state() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Hearted").await;

    let mut detail =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    detail.load().await;

    detail.toggle_like().await;
    assert!(detail.liked());
    assert_eq!(detail.poem().map(|p| p.likes_count), Some(1));

    detail.toggle_like().await;
    assert!(!detail.liked());
    assert_eq!(detail.poem().map(|p| p.likes_count), Some(0));
    assert_eq!(fixture.count_rows("likes").await, 0);

    let stored = fixture
        .store
        .get_poem(&poem.id)
        .await
        .expect("Failed to fetch poem")
        .expect("Poem must exist");
    assert_eq!(stored.likes_count, 0);
}

#[tokio::test]
async fn test_bookmark_pair_leaves_zero_rows() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Saved Then Unsaved").await;

    let mut detail =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    detail.load().await;

    detail.toggle_bookmark().await;
    assert!(detail.bookmarked());
    assert_eq!(fixture.count_rows("bookmarks").await, 1);

    detail.toggle_bookmark().await;
    assert!(!detail.bookmarked());
    assert_eq!(fixture.count_rows("bookmarks").await, 0);
}

#[tokio::test]
async fn test_comment_invisible_until_approved() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Discussed").await;

    let mut detail =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    detail.load().await;

    let outcome = detail
        .add_comment("This one stayed with me.")
        .await
        .expect("Failed to submit comment");
    assert_eq!(outcome, CommentOutcome::PendingModeration);

    // Not appended locally, not visible on re-fetch, counter unmoved
    assert!(detail.comments().is_empty());
    detail.load().await;
    assert!(detail.comments().is_empty());
    assert_eq!(detail.poem().map(|p| p.comments_count), Some(0));

    // External moderation approves; the comment appears with its author
    let comment_id: String = sqlx::query("SELECT id FROM comments WHERE poem_id = ?")
        .bind(&poem.id)
        .fetch_one(&fixture.pool)
        .await
        .expect("Comment row must exist")
        .get("id");
    fixture
        .store
        .approve_comment(&comment_id)
        .await
        .expect("Failed to approve comment");

    detail.load().await;
    assert_eq!(detail.comments().len(), 1);
    assert_eq!(detail.comments()[0].content, "This one stayed with me.");
    assert_eq!(
        detail.comments()[0].author_name.as_deref(),
        Some("Avid Reader")
    );
    assert_eq!(detail.poem().map(|p| p.comments_count), Some(1));

    // Approving twice is a no-op
    fixture
        .store
        .approve_comment(&comment_id)
        .await
        .expect("Second approval must not fail");
    detail.load().await;
    assert_eq!(detail.poem().map(|p| p.comments_count), Some(1));
}

#[tokio::test]
async fn test_comment_skipped_for_empty_text_or_no_user() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Quiet Thread").await;

    let mut detail =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    detail.load().await;

    let outcome = detail
        .add_comment("   \n")
        .await
        .expect("Empty text must not error");
    assert_eq!(outcome, CommentOutcome::Skipped);

    fixture.session.sign_out();
    let outcome = detail
        .add_comment("shouting into the void")
        .await
        .expect("Absent user must not error");
    assert_eq!(outcome, CommentOutcome::Skipped);

    assert_eq!(fixture.count_rows("comments").await, 0);
}

#[tokio::test]
async fn test_share_text_includes_attribution() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Window Rain").await;

    let mut detail =
        PoemDetailController::new(fixture.store.clone(), fixture.session.clone(), &poem.id);
    detail.load().await;

    let text = detail.share_text().expect("Poem is loaded");
    assert_eq!(
        text,
        format!(
            "Window Rain\n\nby R. Hollis\n\n{}\n\nShared from PoetryWorld",
            poem.content
        )
    );
}

// ==================== SAVED ITEMS ====================

#[tokio::test]
async fn test_saved_items_join_queries_and_tab_switching() {
    let fixture = TestFixture::new().await;
    let bookmarked = fixture.create_poem("Kept").await;
    let liked = fixture.create_poem("Loved").await;

    fixture
        .store
        .insert_bookmark(READER_ID, &bookmarked.id)
        .await
        .expect("Failed to bookmark");
    fixture
        .store
        .insert_like(READER_ID, &liked.id)
        .await
        .expect("Failed to like");

    let mut saved = SavedItemsController::new(fixture.store.clone(), fixture.session.clone());
    saved.load_saved().await;

    assert_eq!(saved.active_tab(), SavedTab::Bookmarks);
    assert_eq!(saved.visible_poems().len(), 1);
    assert_eq!(saved.visible_poems()[0].title, "Kept");

    // Switching tabs swaps the cached sequence without re-fetching
    saved.select_tab(SavedTab::Likes);
    assert_eq!(saved.visible_poems().len(), 1);
    assert_eq!(saved.visible_poems()[0].title, "Loved");

    assert_eq!(saved.bookmarked_poems().len(), 1);
    assert_eq!(saved.liked_poems().len(), 1);
}

#[tokio::test]
async fn test_saved_items_without_user_yields_empty_sequences() {
    let fixture = TestFixture::signed_out().await;
    fixture.create_poem("Unreachable").await;

    let mut saved = SavedItemsController::new(fixture.store.clone(), fixture.session.clone());
    saved.load_saved().await;

    assert!(saved.bookmarked_poems().is_empty());
    assert!(saved.liked_poems().is_empty());
}

// ==================== BROWSE ====================

#[tokio::test]
async fn test_browse_loads_categories_and_themes() {
    let fixture = TestFixture::new().await;
    fixture
        .store
        .create_category("Romance", Some("Love poems"), Some("💕"), Some("#e94560"))
        .await
        .expect("Failed to create category");
    fixture
        .store
        .create_category("Nature", None, None, None)
        .await
        .expect("Failed to create category");
    fixture
        .store
        .create_theme("Loss", Some("Grief and remembrance"))
        .await
        .expect("Failed to create theme");

    let mut browse = BrowseController::new(fixture.store.clone());
    browse.load().await;

    let names: Vec<&str> = browse.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Nature", "Romance"]);
    assert_eq!(browse.themes().len(), 1);
    assert_eq!(browse.themes()[0].name, "Loss");
}

// ==================== STORE INVARIANTS ====================

#[tokio::test]
async fn test_create_poem_rejects_blank_fields() {
    let fixture = TestFixture::new().await;

    let err = fixture
        .store
        .create_poem(&CreatePoemRequest {
            title: "   ".to_string(),
            content: "something".to_string(),
            author: "someone".to_string(),
            category_id: None,
            theme_id: None,
            tags: None,
        })
        .await
        .expect_err("Blank title must be rejected");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_duplicate_like_rejected_by_pair_constraint() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Once Only").await;

    fixture
        .store
        .insert_like(READER_ID, &poem.id)
        .await
        .expect("First like must succeed");
    let err = fixture
        .store
        .insert_like(READER_ID, &poem.id)
        .await
        .expect_err("Second like for the pair must fail");
    assert!(matches!(err, AppError::Database(_)));

    assert_eq!(fixture.count_rows("likes").await, 1);
}

#[tokio::test]
async fn test_like_counter_never_goes_negative() {
    let fixture = TestFixture::new().await;
    let poem = fixture.create_poem("Grounded").await;

    // Deleting an absent like is a no-op and the counter stays at zero
    fixture
        .store
        .delete_like(READER_ID, &poem.id)
        .await
        .expect("Deleting an absent like must not fail");

    let stored = fixture
        .store
        .get_poem(&poem.id)
        .await
        .expect("Failed to fetch poem")
        .expect("Poem must exist");
    assert_eq!(stored.likes_count, 0);
}

// ==================== GENERATIVE TEXT ====================

/// Transport that always fails, for exercising the transport-error path.
struct FailingTransport;

impl CompletionTransport for FailingTransport {
    async fn complete(&self, _prompt: &str) -> Result<String, AppError> {
        Err(AppError::Database("backend unreachable".to_string()))
    }
}

#[tokio::test]
async fn test_generate_poem_stub_contract() {
    let service = AiService::new(StubTransport::new("Mock AI response", Duration::from_millis(50)));

    let started = Instant::now();
    let minimal = service
        .generate_poem(&PoemParams {
            topic: "autumn".to_string(),
            ..Default::default()
        })
        .await
        .expect("Stub generation must succeed");
    assert_eq!(minimal, "Mock AI response");
    assert!(started.elapsed() >= Duration::from_millis(50));

    // Every optional parameter accepted when present
    let full = service
        .generate_poem(&PoemParams {
            topic: "autumn".to_string(),
            mood: Some("wistful".to_string()),
            style: Some(PoemStyle::Modern),
            form: Some(PoemForm::Haiku),
            length: Some(PoemLength::Short),
        })
        .await
        .expect("Stub generation must succeed");
    assert_eq!(full, "Mock AI response");
}

#[tokio::test]
async fn test_word_meaning_parses_all_five_fields() {
    let reply = r#"{
        "word": "serendipity",
        "definition": "the occurrence of happy events by chance",
        "synonyms": ["fluke", "fortuity", "luck", "chance", "providence"],
        "usage": ["Finding the café was pure serendipity.",
                  "Serendipity led her to the old bookshop.",
                  "They met by serendipity."],
        "origin": "coined by Horace Walpole in 1754 after The Three Princes of Serendip"
    }"#;
    let service = AiService::new(StubTransport::new(reply, Duration::from_millis(1)));

    let meaning = service
        .word_meaning("serendipity")
        .await
        .expect("Well-formed response must parse");
    assert_eq!(meaning.word, "serendipity");
    assert!(!meaning.definition.is_empty());
    assert_eq!(meaning.synonyms.len(), 5);
    assert_eq!(meaning.usage.len(), 3);
    assert!(!meaning.origin.is_empty());
}

#[tokio::test]
async fn test_malformed_structured_response_is_a_parse_error() {
    let service = AiService::new(StubTransport::new(
        "Sorry, I cannot respond in JSON today.",
        Duration::from_millis(1),
    ));

    let err = service
        .word_meaning("serendipity")
        .await
        .expect_err("Malformed response must fail");
    assert!(err.is_parse());
}

#[tokio::test]
async fn test_transport_failure_is_distinct_from_parse_error() {
    let service = AiService::new(FailingTransport);

    let err = service
        .word_meaning("serendipity")
        .await
        .expect_err("Failing transport must fail");
    assert!(matches!(err, AppError::Transport(_)));
    assert!(!err.is_parse());
}

#[tokio::test]
async fn test_compare_poems_parses_scores() {
    let reply = r#"{
        "poem1": "Ode to Dawn",
        "poem2": "Nocturne",
        "styleDifferences": "formal versus conversational",
        "themeDifferences": "renewal versus rest",
        "literaryTechniques": ["alliteration", "enjambment"],
        "analysisScores": {"depth": 82, "emotion": 74, "clarity": 90, "rhyme": 40, "structure": 66},
        "similarityScore": 35,
        "summary": "Two takes on the turning of the day."
    }"#;
    let service = AiService::new(StubTransport::new(reply, Duration::from_millis(1)));

    let comparison = service
        .compare_poems("Ode to Dawn", "Nocturne")
        .await
        .expect("Well-formed comparison must parse");
    assert_eq!(comparison.analysis_scores.clarity, 90);
    assert_eq!(comparison.similarity_score, 35);
    assert_eq!(comparison.literary_techniques.len(), 2);
}

#[tokio::test]
async fn test_interpret_theme_parses_important_lines() {
    let reply = r#"{
        "mainTheme": "impermanence",
        "poetPOV": "an observer resigned to change",
        "symbolism": ["falling leaves", "the closing door"],
        "emotionalExpression": "quiet melancholy",
        "importantLines": [
            {"line": "the evening folds itself away", "explanation": "the day ends like cloth being put away"},
            {"line": "soft rain on the window", "explanation": "a gentle, persistent reminder of time"},
            {"line": "no step sounds in the hall", "explanation": "absence made audible"}
        ],
        "simpleSummary": "Everything passes, gently."
    }"#;
    let service = AiService::new(StubTransport::new(reply, Duration::from_millis(1)));

    let interpretation = service
        .interpret_theme("Soft rain on the window...")
        .await
        .expect("Well-formed interpretation must parse");
    assert_eq!(interpretation.main_theme, "impermanence");
    assert_eq!(interpretation.important_lines.len(), 3);
    assert_eq!(interpretation.symbolism.len(), 2);
}

#[tokio::test]
async fn test_line_shaped_operations_and_mood_trimming() {
    let service = AiService::new(StubTransport::new(
        "First Light\n\nEmber Songs\nThe Long Field\n",
        Duration::from_millis(1),
    ));
    let titles = service
        .generate_titles("...")
        .await
        .expect("Titles must succeed");
    assert_eq!(titles, vec!["First Light", "Ember Songs", "The Long Field"]);

    let vocabulary = service
        .enhance_vocabulary("sad")
        .await
        .expect("Vocabulary must succeed");
    assert_eq!(vocabulary.len(), 3);

    let moody = AiService::new(StubTransport::new(
        "  wistful longing \n",
        Duration::from_millis(1),
    ));
    let mood = moody.detect_mood("...").await.expect("Mood must succeed");
    assert_eq!(mood, "wistful longing");

    let rewritten = service
        .rewrite_poem("...", "humorous")
        .await
        .expect("Rewrite must succeed");
    assert!(!rewritten.is_empty());
}
