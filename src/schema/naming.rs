//! Synthesized names for anonymous object shapes.
//!
//! ```text
//! User.profile.address              → UserProfileAddress
//! CreateUserInput.address.geo       → CreateUserAddressGeoInput
//! Query.users(filter: { ... })      → UsersFilterInput
//! User.posts(where: { ... })        → UserPostsWhereInput
//! Mutation.ping → { ... }           → PingPayload
//! Mutation.ping → { meta: { ... } } → PingPayloadMeta
//! ```

use crate::base::naming::pascal_path;
use crate::base::to_pascal_case;

const INPUT_SUFFIX: &str = "Input";

/// Where an anonymous shape appears: a name stem, the field path below it
/// and a suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineScope {
    stem: String,
    path: Vec<String>,
    suffix: &'static str,
}

impl InlineScope {
    /// Fields of an object or interface type.
    pub fn object(type_name: &str) -> Self {
        Self {
            stem: type_name.to_string(),
            path: Vec::new(),
            suffix: "",
        }
    }

    /// Fields of an input object; the `Input` suffix moves to the end.
    pub fn input(type_name: &str) -> Self {
        Self {
            stem: type_name
                .strip_suffix(INPUT_SUFFIX)
                .unwrap_or(type_name)
                .to_string(),
            path: Vec::new(),
            suffix: INPUT_SUFFIX,
        }
    }

    /// Arguments of an operation field.
    pub fn arguments(parent: Option<&str>, field: &str) -> Self {
        Self {
            stem: format!("{}{}", parent.unwrap_or_default(), to_pascal_case(field)),
            path: Vec::new(),
            suffix: INPUT_SUFFIX,
        }
    }

    /// The return type of an operation field. Shapes nested in the payload
    /// are named after the payload itself.
    pub fn payload(parent: Option<&str>, field: &str) -> Self {
        Self::object(&format!(
            "{}{}Payload",
            parent.unwrap_or_default(),
            to_pascal_case(field)
        ))
    }

    /// Arguments of a directive definition.
    pub fn directive(name: &str) -> Self {
        Self {
            stem: format!("{}Directive", to_pascal_case(name)),
            path: Vec::new(),
            suffix: INPUT_SUFFIX,
        }
    }

    /// Scope one field further down.
    pub fn child(&self, field: &str) -> Self {
        let mut path = self.path.clone();
        path.push(field.to_string());
        Self {
            stem: self.stem.clone(),
            path,
            suffix: self.suffix,
        }
    }

    /// Name of a shape found at this scope.
    pub fn name(&self) -> String {
        format!("{}{}{}", self.stem, pascal_path(&self.path), self.suffix)
    }

    /// Dotted field path for diagnostics (`User.profile.address`).
    pub fn describe(&self, owner: &str) -> String {
        std::iter::once(owner)
            .chain(self.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}
