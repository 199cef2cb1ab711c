/// Errors that can occur when validating a resource identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdError {
    /// The identifier was empty
    #[error("id is required")]
    Empty,
    /// The identifier is a relative directory reference (`.` or `..`)
    #[error("id '{0}' is a reserved path component")]
    Reserved(String),
    /// The identifier contains a path separator or control character
    #[error("id '{0}' contains characters that are not allowed in a file name")]
    InvalidCharacter(String),
}

/// Externally supplied key for a post or project.
///
/// The identifier doubles as a file name (`<id>.md`) or a directory name (`<id>/`), so it must
/// be usable as exactly one path component. Once constructed, joining it onto a store root can
/// never escape that root.
///
/// Unlike a trimmed text value, the input is kept verbatim: `" a "` and `"a"` are distinct
/// identifiers, matching the file names a caller would see on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Validates and wraps an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Empty`] for an empty string, [`IdError::Reserved`] for `.` or `..`,
    /// and [`IdError::InvalidCharacter`] if the input contains `/`, `\` or any control
    /// character (including NUL).
    pub fn parse(input: impl AsRef<str>) -> Result<Self, IdError> {
        let input = input.as_ref();
        if input.is_empty() {
            return Err(IdError::Empty);
        }
        if input == "." || input == ".." {
            return Err(IdError::Reserved(input.to_owned()));
        }
        if !Self::is_path_safe(input) {
            return Err(IdError::InvalidCharacter(input.to_owned()));
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns true if `input` contains no separators or control characters.
    ///
    /// This is purely syntactic and does not reject `.`/`..`; use [`ResourceId::parse`] for
    /// full validation.
    pub fn is_path_safe(input: &str) -> bool {
        !input
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ResourceId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_names() {
        for input in ["hello", "my-post_2", "release.notes", "Ünïcode", " spaced "] {
            let id = ResourceId::parse(input).expect("should accept plain name");
            assert_eq!(id.as_str(), input);
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ResourceId::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_rejects_traversal() {
        assert!(matches!(ResourceId::parse(".."), Err(IdError::Reserved(_))));
        assert!(matches!(ResourceId::parse("."), Err(IdError::Reserved(_))));
        assert!(matches!(
            ResourceId::parse("../etc"),
            Err(IdError::InvalidCharacter(_))
        ));
        assert!(matches!(
            ResourceId::parse("a\\b"),
            Err(IdError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_parse_rejects_control_characters() {
        assert!(matches!(
            ResourceId::parse("bad\0id"),
            Err(IdError::InvalidCharacter(_))
        ));
        assert!(matches!(
            ResourceId::parse("line\nbreak"),
            Err(IdError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ResourceId = serde_json::from_str("\"demo\"").unwrap();
        assert_eq!(ok.to_string(), "demo");

        let err = serde_json::from_str::<ResourceId>("\"a/b\"");
        assert!(err.is_err());
    }
}
