use std::fs;
use std::path::{Path, PathBuf};

use feed_engine::AtomicFileWriter;
use feed_logging::{feed_error, feed_info, feed_warn};
use serde::{Deserialize, Serialize};
use swipe_core::User;

const SESSION_FILENAME: &str = ".swipefeed_session.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedUser {
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSession {
    user: Option<PersistedUser>,
}

/// Restores the signed-in user, if any. Unreadable state counts as signed out.
pub(crate) fn load_session(state_dir: &Path) -> Option<User> {
    let path = state_dir.join(SESSION_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            feed_warn!("Failed to read session from {:?}: {}", path, err);
            return None;
        }
    };

    let session: PersistedSession = match ron::from_str(&content) {
        Ok(session) => session,
        Err(err) => {
            feed_warn!("Failed to parse session from {:?}: {}", path, err);
            return None;
        }
    };

    let user = session.user.map(|user| User {
        id: user.id,
        name: user.name,
        email: user.email,
        avatar: user.avatar,
    });
    if let Some(user) = &user {
        feed_info!("Restored session for user {}", user.id);
    }
    user
}

pub(crate) fn save_session(state_dir: &Path, user: &User) {
    let session = PersistedSession {
        user: Some(PersistedUser {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
        }),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&session, pretty) {
        Ok(text) => text,
        Err(err) => {
            feed_error!("Failed to serialize session: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    if let Err(err) = writer.write(SESSION_FILENAME, &content) {
        feed_error!("Failed to write session to {:?}: {}", state_dir, err);
    }
}

pub(crate) fn clear_session(state_dir: &Path) {
    let writer = AtomicFileWriter::new(PathBuf::from(state_dir));
    if let Err(err) = writer.remove(SESSION_FILENAME) {
        feed_error!("Failed to clear session in {:?}: {}", state_dir, err);
    }
}
