//! Identifier types for tracker entities.
//!
//! Identifiers are opaque UUID wrappers. They are minted by the entity store
//! when a record is inserted; the domain only wraps and compares them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier of a project.
    ProjectId
);
entity_id!(
    /// Unique identifier of an epic.
    EpicId
);
entity_id!(
    /// Unique identifier of a story.
    StoryId
);
entity_id!(
    /// Unique identifier of a sprint.
    SprintId
);
entity_id!(
    /// Unique identifier of a comment.
    CommentId
);
entity_id!(
    /// Unique identifier of a project document.
    DocumentId
);
