//! In-memory fake ports for use-case tests

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{Duration, TimeZone, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    Caption, Email, FavoriteEntry, FavoritesRecord, FeedCursor, ImageUrl, MediaPath, NewPost,
    Post, PostId, UserId, UserProfile,
};
use crate::ports::{
    AuthSession, IDocumentStore, IIdentityProvider, IImageGallery, IMediaStore, ISessionStore,
    IUserNotice, LiveSubscription, Notice, PermissionState, PickedImage,
};

/// A picked image fixture
pub fn picked_image() -> PickedImage {
    PickedImage {
        path: PathBuf::from("/pictures/sunset.jpg"),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

// ============================================================================
// FakeDocumentStore
// ============================================================================

#[derive(Default)]
pub struct FakeDocumentStore {
    feed: Mutex<Vec<Post>>,
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    favorites: Mutex<HashMap<UserId, FavoritesRecord>>,
    favorites_watchers: Mutex<Vec<(UserId, mpsc::Sender<FavoritesRecord>)>>,
    create_count: AtomicUsize,
    feed_query_count: AtomicUsize,
    fail_feed_queries: AtomicBool,
    fail_creates: AtomicBool,
    fail_favorite_writes: AtomicBool,
}

impl FakeDocumentStore {
    /// A store whose feed holds `count` posts, `post-1` oldest
    pub fn with_feed(count: u32) -> Self {
        let store = Self::default();
        {
            let mut feed = store.feed.lock().unwrap();
            for i in 1..=count {
                feed.push(Post {
                    id: PostId::new(format!("post-{i}")).unwrap(),
                    image_url: ImageUrl::new(format!("https://cdn.example.com/post-{i}.jpg"))
                        .unwrap(),
                    caption: Caption::new(format!("caption {i}")).unwrap(),
                    author: UserId::new("author".to_string()).unwrap(),
                    created_at: Some(Utc.timestamp_opt(i64::from(i), 0).unwrap()),
                });
            }
        }
        store
    }

    pub fn fail_feed_queries(&self, fail: bool) {
        self.fail_feed_queries.store(fail, Ordering::SeqCst);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_favorite_writes(&self, fail: bool) {
        self.fail_favorite_writes.store(fail, Ordering::SeqCst);
    }

    pub fn create_count(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
    }

    pub fn feed_query_count(&self) -> usize {
        self.feed_query_count.load(Ordering::SeqCst)
    }

    pub fn favorites_of(&self, owner: &str) -> FavoritesRecord {
        let owner = UserId::new(owner.to_string()).unwrap();
        self.favorites
            .lock()
            .unwrap()
            .get(&owner)
            .cloned()
            .unwrap_or_else(|| FavoritesRecord::empty(owner))
    }

    pub fn put_profile(&self, profile: UserProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user.clone(), profile);
    }

    /// The feed ordered newest-first, as the backend would return it
    fn ordered_feed(&self) -> Vec<Post> {
        let mut feed = self.feed.lock().unwrap().clone();
        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        feed
    }

    async fn notify_favorites_watchers(&self, owner: &UserId) {
        let record = self
            .favorites
            .lock()
            .unwrap()
            .get(owner)
            .cloned()
            .unwrap_or_else(|| FavoritesRecord::empty(owner.clone()));
        let senders: Vec<mpsc::Sender<FavoritesRecord>> = self
            .favorites_watchers
            .lock()
            .unwrap()
            .iter()
            .filter(|(watched, _)| watched == owner)
            .map(|(_, tx)| tx.clone())
            .collect();
        for tx in senders {
            let _ = tx.send(record.clone()).await;
        }
    }
}

#[async_trait::async_trait]
impl IDocumentStore for FakeDocumentStore {
    async fn create_post(&self, new_post: &NewPost) -> anyhow::Result<Post> {
        if self.fail_creates.load(Ordering::SeqCst) {
            anyhow::bail!("document create rejected");
        }
        self.create_count.fetch_add(1, Ordering::SeqCst);

        let mut feed = self.feed.lock().unwrap();
        let newest = feed
            .iter()
            .filter_map(|p| p.created_at)
            .max()
            .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap());
        let post = Post {
            id: PostId::new(format!("post-{}", feed.len() + 1)).unwrap(),
            image_url: new_post.image_url.clone(),
            caption: new_post.caption.clone(),
            author: new_post.author.clone(),
            created_at: Some(newest + Duration::seconds(1)),
        };
        feed.push(post.clone());
        Ok(post)
    }

    async fn fetch_feed_page(
        &self,
        page_size: u32,
        after: Option<&FeedCursor>,
    ) -> anyhow::Result<Vec<Post>> {
        self.feed_query_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_feed_queries.load(Ordering::SeqCst) {
            anyhow::bail!("feed query failed");
        }

        let ordered = self.ordered_feed();
        let start = match after {
            None => 0,
            Some(cursor) => match ordered.iter().position(|p| p.id == cursor.post_id) {
                Some(idx) => idx + 1,
                None => ordered.len(),
            },
        };
        Ok(ordered
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect())
    }

    async fn fetch_post(&self, post: &PostId) -> anyhow::Result<Option<Post>> {
        Ok(self
            .feed
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == post)
            .cloned())
    }

    async fn fetch_posts_by_author(&self, author: &UserId) -> anyhow::Result<Vec<Post>> {
        Ok(self
            .ordered_feed()
            .into_iter()
            .filter(|p| &p.author == author)
            .collect())
    }

    async fn fetch_profile(&self, user: &UserId) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.profiles.lock().unwrap().get(user).cloned())
    }

    async fn save_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        self.put_profile(profile.clone());
        Ok(())
    }

    async fn fetch_favorites(&self, owner: &UserId) -> anyhow::Result<FavoritesRecord> {
        Ok(self.favorites_of(owner.as_str()))
    }

    async fn add_favorite(&self, owner: &UserId, entry: &FavoriteEntry) -> anyhow::Result<()> {
        if self.fail_favorite_writes.load(Ordering::SeqCst) {
            anyhow::bail!("favorites write rejected");
        }
        {
            let mut favorites = self.favorites.lock().unwrap();
            favorites
                .entry(owner.clone())
                .or_insert_with(|| FavoritesRecord::empty(owner.clone()))
                .entries
                .insert(entry.post.id.clone(), entry.clone());
        }
        self.notify_favorites_watchers(owner).await;
        Ok(())
    }

    async fn remove_favorite(&self, owner: &UserId, post: &PostId) -> anyhow::Result<()> {
        if self.fail_favorite_writes.load(Ordering::SeqCst) {
            anyhow::bail!("favorites write rejected");
        }
        {
            let mut favorites = self.favorites.lock().unwrap();
            if let Some(record) = favorites.get_mut(owner) {
                record.entries.remove(post);
            }
        }
        self.notify_favorites_watchers(owner).await;
        Ok(())
    }

    async fn watch_favorites(
        &self,
        owner: &UserId,
    ) -> anyhow::Result<LiveSubscription<FavoritesRecord>> {
        let (tx, rx) = mpsc::channel(16);
        self.favorites_watchers
            .lock()
            .unwrap()
            .push((owner.clone(), tx));
        Ok(LiveSubscription::new(rx, CancellationToken::new()))
    }

    async fn watch_profile(
        &self,
        user: &UserId,
    ) -> anyhow::Result<LiveSubscription<UserProfile>> {
        let (tx, rx) = mpsc::channel(4);
        let current = self
            .profiles
            .lock()
            .unwrap()
            .get(user)
            .cloned()
            .unwrap_or_else(|| UserProfile::placeholder(user.clone()));
        let _ = tx.send(current).await;
        Ok(LiveSubscription::new(rx, CancellationToken::new()))
    }

    async fn watch_posts_by_author(
        &self,
        author: &UserId,
    ) -> anyhow::Result<LiveSubscription<Vec<Post>>> {
        let (tx, rx) = mpsc::channel(4);
        let current = self.fetch_posts_by_author(author).await?;
        let _ = tx.send(current).await;
        Ok(LiveSubscription::new(rx, CancellationToken::new()))
    }
}

// ============================================================================
// FakeMediaStore
// ============================================================================

#[derive(Default)]
pub struct FakeMediaStore {
    uploads: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
}

impl FakeMediaStore {
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn uploaded_paths(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IMediaStore for FakeMediaStore {
    async fn upload_image(
        &self,
        path: &MediaPath,
        _bytes: &[u8],
        _content_type: &str,
    ) -> anyhow::Result<ImageUrl> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            anyhow::bail!("upload rejected");
        }
        self.uploads.lock().unwrap().push(path.as_str().to_string());
        Ok(ImageUrl::new(format!("https://cdn.example.com/{path}"))?)
    }
}

// ============================================================================
// FakeGallery
// ============================================================================

pub struct FakeGallery {
    permission: Mutex<PermissionState>,
    cancel_next: AtomicBool,
}

impl FakeGallery {
    pub fn granted_with_image() -> Self {
        Self {
            permission: Mutex::new(PermissionState::Granted),
            cancel_next: AtomicBool::new(false),
        }
    }

    pub fn deny(&self) {
        *self.permission.lock().unwrap() = PermissionState::Denied;
    }

    pub fn cancel_next_pick(&self) {
        self.cancel_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl IImageGallery for FakeGallery {
    async fn permission(&self) -> PermissionState {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> anyhow::Result<PermissionState> {
        Ok(*self.permission.lock().unwrap())
    }

    async fn pick_image(&self) -> anyhow::Result<Option<PickedImage>> {
        if self.cancel_next.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(picked_image()))
    }
}

// ============================================================================
// FakeNotice
// ============================================================================

#[derive(Default)]
pub struct FakeNotice {
    shown: Mutex<Vec<Notice>>,
}

impl FakeNotice {
    pub fn shown(&self) -> Vec<Notice> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IUserNotice for FakeNotice {
    async fn show(&self, notice: &Notice) {
        self.shown.lock().unwrap().push(notice.clone());
    }
}

// ============================================================================
// FakeIdentityProvider / FakeSessionStore
// ============================================================================

#[derive(Default)]
pub struct FakeIdentityProvider {
    reject_with: Mutex<Option<String>>,
}

impl FakeIdentityProvider {
    pub fn reject_with(&self, message: &str) {
        *self.reject_with.lock().unwrap() = Some(message.to_string());
    }

    fn check_rejection(&self) -> anyhow::Result<()> {
        if let Some(message) = self.reject_with.lock().unwrap().clone() {
            anyhow::bail!(message);
        }
        Ok(())
    }

    fn session_for(email: &Email) -> AuthSession {
        let local = email.as_str().split('@').next().unwrap_or("user");
        AuthSession {
            user_id: UserId::new(format!("uid-{local}")).unwrap(),
            id_token: format!("token-{local}"),
            refresh_token: Some(format!("refresh-{local}")),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }
}

#[async_trait::async_trait]
impl IIdentityProvider for FakeIdentityProvider {
    async fn sign_up(&self, email: &Email, _password: &str) -> anyhow::Result<AuthSession> {
        self.check_rejection()?;
        Ok(Self::session_for(email))
    }

    async fn sign_in(&self, email: &Email, _password: &str) -> anyhow::Result<AuthSession> {
        self.check_rejection()?;
        Ok(Self::session_for(email))
    }

    async fn sign_out(&self, _session: &AuthSession) -> anyhow::Result<()> {
        self.check_rejection()
    }
}

#[derive(Default)]
pub struct FakeSessionStore {
    session: Mutex<Option<AuthSession>>,
}

#[async_trait::async_trait]
impl ISessionStore for FakeSessionStore {
    async fn load(&self) -> anyhow::Result<Option<AuthSession>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &AuthSession) -> anyhow::Result<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
