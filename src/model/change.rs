/// How a file was touched by a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Delete,
    Modify,
    Rename,
}

/// A method touched by a change, as reported by the history source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedMethod {
    /// Fully qualified class and method signature, e.g. `a.b.Foo::bar(int)`
    pub long_name: String,
}

impl ChangedMethod {
    pub fn new(long_name: impl Into<String>) -> Self {
        Self { long_name: long_name.into() }
    }
}

/// One file touched by one commit
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub methods: Vec<ChangedMethod>,
}

impl ChangeEvent {
    pub fn added(path: &str, methods: &[&str]) -> Self {
        Self::build(ChangeKind::Add, None, Some(path), methods)
    }

    pub fn deleted(path: &str, methods: &[&str]) -> Self {
        Self::build(ChangeKind::Delete, Some(path), None, methods)
    }

    pub fn modified(path: &str, methods: &[&str]) -> Self {
        Self::build(ChangeKind::Modify, Some(path), Some(path), methods)
    }

    pub fn renamed(old_path: &str, new_path: &str, methods: &[&str]) -> Self {
        Self::build(ChangeKind::Rename, Some(old_path), Some(new_path), methods)
    }

    fn build(kind: ChangeKind, old: Option<&str>, new: Option<&str>, methods: &[&str]) -> Self {
        Self {
            kind,
            old_path: old.map(String::from),
            new_path: new.map(String::from),
            methods: methods.iter().map(|m| ChangedMethod::new(*m)).collect(),
        }
    }

    /// The single path that represents this change in method keys.
    ///
    /// Added and renamed files use the new path; deleted and modified files
    /// use the old one.
    ///
    /// # Panics
    ///
    /// Panics if the path selected for this kind is missing or empty, which
    /// means the history source produced a malformed event.
    pub fn operative_path(&self) -> &str {
        let path = match self.kind {
            ChangeKind::Add | ChangeKind::Rename => self.new_path.as_deref(),
            ChangeKind::Delete | ChangeKind::Modify => self.old_path.as_deref(),
        }
        .unwrap_or_default();
        assert!(
            !path.is_empty(),
            "malformed {:?} change event: no operative path (old={:?}, new={:?})",
            self.kind,
            self.old_path,
            self.new_path
        );
        path
    }
}

/// A commit as yielded by a history source
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub hash: String,
    pub changes: Vec<ChangeEvent>,
}

impl CommitRecord {
    pub fn new(hash: impl Into<String>, changes: Vec<ChangeEvent>) -> Self {
        Self { hash: hash.into(), changes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_uses_new_path() {
        let event = ChangeEvent::added("src/New.java", &[]);
        assert_eq!(event.operative_path(), "src/New.java");
    }

    #[test]
    fn test_delete_uses_old_path() {
        let event = ChangeEvent::deleted("src/Gone.java", &[]);
        assert_eq!(event.operative_path(), "src/Gone.java");
    }

    #[test]
    fn test_modify_uses_old_path() {
        let event = ChangeEvent {
            kind: ChangeKind::Modify,
            old_path: Some("src/Before.java".into()),
            new_path: Some("src/After.java".into()),
            methods: vec![],
        };
        assert_eq!(event.operative_path(), "src/Before.java");
    }

    #[test]
    fn test_rename_uses_new_path() {
        let event = ChangeEvent::renamed("src/Old.java", "src/Renamed.java", &[]);
        assert_eq!(event.operative_path(), "src/Renamed.java");
    }

    #[test]
    #[should_panic(expected = "no operative path")]
    fn test_missing_path_panics() {
        let event = ChangeEvent {
            kind: ChangeKind::Add,
            old_path: Some("src/Old.java".into()),
            new_path: None,
            methods: vec![],
        };
        event.operative_path();
    }

    #[test]
    #[should_panic(expected = "no operative path")]
    fn test_empty_path_panics() {
        let event = ChangeEvent::deleted("", &[]);
        event.operative_path();
    }
}
