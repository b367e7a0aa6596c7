use crate::event::ApiEvent;
use crate::user::UserId;

const COLLECTION: &str = "users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CreateUser,
    ListUsers,
    GetUser(UserId),
    UpdateUser(UserId),
    DeleteUser(UserId),
}

impl Route {
    /// Matches the event against `/users` and `/users/{id}` exactly, after
    /// stripping `base_path`. Returns `None` for anything else.
    pub fn resolve(event: &ApiEvent, base_path: Option<&str>) -> Option<Self> {
        let path = strip_base_path(&event.path, base_path)?;
        let path = path.strip_suffix('/').unwrap_or(path);
        let rest = path.strip_prefix('/')?;

        let segments: Vec<&str> = rest.split('/').collect();
        match (event.method.as_str(), segments.as_slice()) {
            ("POST", [COLLECTION]) => Some(Self::CreateUser),
            ("GET", [COLLECTION]) => Some(Self::ListUsers),
            (method, [COLLECTION, segment]) => {
                let id = path_id(event, segment)?;
                match method {
                    "GET" => Some(Self::GetUser(id)),
                    "PUT" => Some(Self::UpdateUser(id)),
                    "DELETE" => Some(Self::DeleteUser(id)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::ListUsers => "list_users",
            Self::GetUser(_) => "get_user",
            Self::UpdateUser(_) => "update_user",
            Self::DeleteUser(_) => "delete_user",
        }
    }
}

fn strip_base_path<'a>(path: &'a str, base_path: Option<&str>) -> Option<&'a str> {
    let base = match base_path.map(|base| base.trim_end_matches('/')) {
        None | Some("") => return Some(path),
        Some(base) => base,
    };

    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Explicit path parameters win over the raw segment since API Gateway has
/// already matched its own template against the path.
fn path_id(event: &ApiEvent, segment: &str) -> Option<UserId> {
    let raw = event
        .path_parameters
        .get("id")
        .or_else(|| event.path_parameters.get("userId"))
        .map(String::as_str)
        .unwrap_or(segment);

    if raw.trim().is_empty() {
        None
    } else {
        Some(UserId::new(raw))
    }
}
