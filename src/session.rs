//! The session store: single source of truth for who is logged in.
//!
//! A session is either fully absent or fully populated — never partial.
//! Every mutating operation writes through to persisted storage and then
//! republishes the current state to all subscribers.

use tracing::debug;

use crate::kv::SessionStorage;
use crate::models::{AuthResponse, Role};

const KEY_TOKEN: &str = "jwtToken";
const KEY_USER_ID: &str = "userId";
const KEY_USERNAME: &str = "username";
const KEY_EMAIL: &str = "email";
const KEY_ROLE: &str = "role";
const KEY_FIRST_NAME: &str = "firstName";
const KEY_LAST_NAME: &str = "lastName";

/// The authenticated identity as the console sees it. Identifier and names
/// are kept as the strings they were persisted as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub token: String,
    pub first_name: String,
    pub last_name: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Fields a profile edit may change. Unset fields keep their prior value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

type Subscriber = Box<dyn Fn(Option<&Session>) + Send>;

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    session: Option<Session>,
    subscribers: Vec<Subscriber>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            storage,
            session: None,
            subscribers: Vec::new(),
        }
    }

    /// Reconstructs the session from persisted storage. Runs once at
    /// startup, before any authorization decision; no network involved.
    /// All five required keys must be present, otherwise the state is
    /// absent.
    pub fn initialize(&mut self) {
        let required = (
            self.storage.get(KEY_TOKEN),
            self.storage.get(KEY_USER_ID),
            self.storage.get(KEY_USERNAME),
            self.storage.get(KEY_EMAIL),
            self.storage.get(KEY_ROLE).and_then(|r| r.parse::<Role>().ok()),
        );
        self.session = match required {
            (Some(token), Some(user_id), Some(username), Some(email), Some(role)) => {
                debug!("restored session for {username}");
                Some(Session {
                    user_id,
                    username,
                    email,
                    role,
                    token,
                    first_name: self.storage.get(KEY_FIRST_NAME).unwrap_or_default(),
                    last_name: self.storage.get(KEY_LAST_NAME).unwrap_or_default(),
                })
            }
            _ => None,
        };
        self.publish();
    }

    /// Persists the backend's auth payload field by field and publishes the
    /// populated session. The payload is trusted as-is.
    pub fn login(&mut self, auth: &AuthResponse) {
        let session = Session {
            user_id: auth.user_id.to_string(),
            username: auth.username.clone(),
            email: auth.email.clone(),
            role: auth.role,
            token: auth.jwt.clone(),
            first_name: auth.first_name.clone().unwrap_or_default(),
            last_name: auth.last_name.clone().unwrap_or_default(),
        };
        self.persist(&session);
        self.session = Some(session);
        self.publish();
    }

    /// Erases every identity key and publishes the absent state. Calling
    /// this while already logged out is a no-op.
    pub fn logout(&mut self) {
        self.storage.clear();
        self.session = None;
        self.publish();
    }

    /// Shallow-merges the given fields into the active session, re-persists
    /// and republishes. Silently does nothing when no session is active.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if let Some(username) = update.username {
            session.username = username;
        }
        if let Some(email) = update.email {
            session.email = email;
        }
        if let Some(first_name) = update.first_name {
            session.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            session.last_name = last_name;
        }
        self.persist(&session);
        self.session = Some(session);
        self.publish();
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(Option<&Session>) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.token.clone())
    }

    fn persist(&mut self, session: &Session) {
        self.storage.set(KEY_TOKEN, &session.token);
        self.storage.set(KEY_USER_ID, &session.user_id);
        self.storage.set(KEY_USERNAME, &session.username);
        self.storage.set(KEY_EMAIL, &session.email);
        self.storage.set(KEY_ROLE, session.role.as_str());
        self.storage.set(KEY_FIRST_NAME, &session.first_name);
        self.storage.set(KEY_LAST_NAME, &session.last_name);
    }

    fn publish(&self) {
        let current = self.session.as_ref();
        for subscriber in &self.subscribers {
            subscriber(current);
        }
    }
}
