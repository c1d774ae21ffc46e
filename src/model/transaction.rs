use serde::{Deserialize, Serialize};

use super::MethodId;

/// Summary of the methods one commit changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetails {
    /// Operative path of the last qualifying file processed in the commit
    pub path: String,
    /// Distinct qualifying files with at least one resolved method
    #[serde(rename = "number_of_affected_java_source_code_files")]
    pub affected_files: usize,
    #[serde(rename = "modified_methods")]
    pub methods: Vec<MethodId>,
    /// Size of the co-change class; absent until frequencies are annotated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_frequency: Option<usize>,
}

/// One record of the transaction database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTransaction {
    pub commit_hash: String,
    pub commit_details: Vec<CommitDetails>,
}

impl CommitTransaction {
    pub fn new(commit_hash: impl Into<String>, details: CommitDetails) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            commit_details: vec![details],
        }
    }

    /// Whether every details block carries a frequency
    pub fn is_annotated(&self) -> bool {
        self.commit_details
            .iter()
            .all(|d| d.transaction_frequency.is_some())
    }
}

/// All transactions of one repository, in traversal order
pub type TransactionDatabase = Vec<CommitTransaction>;

#[cfg(test)]
mod tests {
    use super::*;

    fn details(freq: Option<usize>) -> CommitDetails {
        CommitDetails {
            path: "src/Foo.java".to_string(),
            affected_files: 1,
            methods: vec![MethodId::from("m1"), MethodId::from("m2")],
            transaction_frequency: freq,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let tx = CommitTransaction::new("abc123", details(None));
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["commit_hash"], "abc123");
        let block = &json["commit_details"][0];
        assert_eq!(block["path"], "src/Foo.java");
        assert_eq!(block["number_of_affected_java_source_code_files"], 1);
        assert_eq!(block["modified_methods"][1], "m2");
        // Not written until annotated
        assert!(block.get("transaction_frequency").is_none());
    }

    #[test]
    fn test_frequency_serialized_once_set() {
        let tx = CommitTransaction::new("abc123", details(Some(3)));
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["commit_details"][0]["transaction_frequency"], 3);
        assert!(tx.is_annotated());
    }

    #[test]
    fn test_parse_unannotated_record() {
        let raw = r#"[{"commit_hash":"c1","commit_details":[{"path":"A.java",
            "number_of_affected_java_source_code_files":2,"modified_methods":["x"]}]}]"#;
        let db: TransactionDatabase = serde_json::from_str(raw).unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db[0].commit_details[0].affected_files, 2);
        assert!(!db[0].is_annotated());
    }
}
