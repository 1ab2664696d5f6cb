//! Resource descriptors
//!
//! Each resource kind declares its endpoint template, the parameters every
//! operation needs, and which operations the server supports for it. The
//! dispatcher never hardcodes a kind's shape; it only reads these tables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operations a resource kind supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub list: bool,
    pub get: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Capabilities {
    /// Every operation
    pub const ALL: Self = Self {
        list: true,
        get: true,
        create: true,
        update: true,
        delete: true,
    };

    /// Everything except update
    pub const NO_UPDATE: Self = Self {
        update: false,
        ..Self::ALL
    };

    /// List only
    pub const LIST_ONLY: Self = Self {
        list: true,
        get: false,
        create: false,
        update: false,
        delete: false,
    };

    /// Get only
    pub const GET_ONLY: Self = Self {
        list: false,
        get: true,
        create: false,
        update: false,
        delete: false,
    };

    /// Create only
    pub const CREATE_ONLY: Self = Self {
        list: false,
        get: false,
        create: true,
        update: false,
        delete: false,
    };
}

/// Static description of one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Type name, e.g. `ProjectBranch`
    pub name: &'static str,
    /// Endpoint path template relative to the API root
    pub path: &'static str,
    /// Attribute holding the primary identifier
    pub id_attr: &'static str,
    /// `get` addresses a single object by id (`/user` does not)
    pub get_requires_id: bool,
    /// Parameters required to list
    pub list_requires: &'static [&'static str],
    /// Parameters required to get
    pub get_requires: &'static [&'static str],
    /// Attributes required to create
    pub create_requires: &'static [&'static str],
    /// Attributes required to update
    pub update_requires: &'static [&'static str],
    pub capabilities: Capabilities,
}

const CURRENT_USER: ResourceDescriptor = ResourceDescriptor {
    name: "CurrentUser",
    path: "/user",
    id_attr: "id",
    get_requires_id: false,
    list_requires: &[],
    get_requires: &[],
    create_requires: &[],
    update_requires: &[],
    capabilities: Capabilities::GET_ONLY,
};

const USER: ResourceDescriptor = ResourceDescriptor {
    name: "User",
    path: "/users",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &[],
    get_requires: &[],
    create_requires: &["email", "password", "username", "name"],
    update_requires: &[],
    capabilities: Capabilities::ALL,
};

const PROJECT: ResourceDescriptor = ResourceDescriptor {
    name: "Project",
    path: "/projects",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &[],
    get_requires: &[],
    create_requires: &["name"],
    update_requires: &[],
    capabilities: Capabilities::ALL,
};

const PROJECT_BRANCH: ResourceDescriptor = ResourceDescriptor {
    name: "ProjectBranch",
    path: "/projects/{{ project_id }}/repository/branches",
    id_attr: "name",
    get_requires_id: true,
    list_requires: &["project_id"],
    get_requires: &["project_id"],
    create_requires: &["project_id", "branch_name", "ref"],
    update_requires: &[],
    capabilities: Capabilities::NO_UPDATE,
};

const PROJECT_ISSUE: ResourceDescriptor = ResourceDescriptor {
    name: "ProjectIssue",
    path: "/projects/{{ project_id }}/issues",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &["project_id"],
    get_requires: &["project_id"],
    create_requires: &["project_id", "title"],
    update_requires: &["project_id"],
    capabilities: Capabilities::ALL,
};

const GROUP: ResourceDescriptor = ResourceDescriptor {
    name: "Group",
    path: "/groups",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &[],
    get_requires: &[],
    create_requires: &["name", "path"],
    update_requires: &[],
    capabilities: Capabilities::ALL,
};

const HOOK: ResourceDescriptor = ResourceDescriptor {
    name: "Hook",
    path: "/hooks",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &[],
    get_requires: &[],
    create_requires: &["url"],
    update_requires: &[],
    capabilities: Capabilities::NO_UPDATE,
};

const ISSUE: ResourceDescriptor = ResourceDescriptor {
    name: "Issue",
    path: "/issues",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &[],
    get_requires: &[],
    create_requires: &[],
    update_requires: &[],
    capabilities: Capabilities::LIST_ONLY,
};

const TEAM: ResourceDescriptor = ResourceDescriptor {
    name: "Team",
    path: "/user_teams",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &[],
    get_requires: &[],
    create_requires: &["name", "path"],
    update_requires: &[],
    capabilities: Capabilities::NO_UPDATE,
};

const USER_PROJECT: ResourceDescriptor = ResourceDescriptor {
    name: "UserProject",
    path: "/projects/user/{{ user_id }}",
    id_attr: "id",
    get_requires_id: true,
    list_requires: &[],
    get_requires: &[],
    create_requires: &["name", "user_id"],
    update_requires: &[],
    capabilities: Capabilities::CREATE_ONLY,
};

/// The registered resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    CurrentUser,
    User,
    Project,
    ProjectBranch,
    ProjectIssue,
    Group,
    Hook,
    Issue,
    Team,
    UserProject,
}

impl ResourceKind {
    /// Every registered kind
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::CurrentUser,
        ResourceKind::User,
        ResourceKind::Project,
        ResourceKind::ProjectBranch,
        ResourceKind::ProjectIssue,
        ResourceKind::Group,
        ResourceKind::Hook,
        ResourceKind::Issue,
        ResourceKind::Team,
        ResourceKind::UserProject,
    ];

    /// The descriptor for this kind
    pub fn descriptor(self) -> &'static ResourceDescriptor {
        match self {
            ResourceKind::CurrentUser => &CURRENT_USER,
            ResourceKind::User => &USER,
            ResourceKind::Project => &PROJECT,
            ResourceKind::ProjectBranch => &PROJECT_BRANCH,
            ResourceKind::ProjectIssue => &PROJECT_ISSUE,
            ResourceKind::Group => &GROUP,
            ResourceKind::Hook => &HOOK,
            ResourceKind::Issue => &ISSUE,
            ResourceKind::Team => &TEAM,
            ResourceKind::UserProject => &USER_PROJECT,
        }
    }

    /// Type name, e.g. `ProjectBranch`
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Command-line tag, e.g. `project-branch`
    pub fn tag(self) -> String {
        let mut tag = String::new();
        for (i, c) in self.name().char_indices() {
            if c.is_ascii_uppercase() {
                if i > 0 {
                    tag.push('-');
                }
                tag.push(c.to_ascii_lowercase());
            } else {
                tag.push(c);
            }
        }
        tag
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    /// Accepts type names (`ProjectBranch`) and tags (`project-branch`,
    /// `project_branch`)
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|kind| kind.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| Error::unsupported(format!("'{s}' is not a registered resource kind")))
    }
}
