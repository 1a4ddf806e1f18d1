//! Infrastructure layer for atoss-distill
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod dataset;
pub mod output;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileBatchConfig, FileConfig, FileDatasetConfig, FileInferenceConfig,
    FileSplitConfig,
};
pub use dataset::JsonDataset;
pub use output::AppendFileSink;
pub use providers::OpenAiCompatibleGateway;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use atoss_application::{
        BatchParams, CompletionRequest, GatewayError, LlmGateway, RunBatchInput, RunBatchUseCase,
        SplitParams,
    };
    use std::io::Write;
    use std::sync::Arc;

    const SENTENCE: &str = "The food was great but the service was slow.";

    struct StubGateway;

    #[async_trait]
    impl LlmGateway for StubGateway {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            if request.temperature > 0.0 {
                Ok("The food was great. The service was slow.".to_string())
            } else {
                Ok("The food was great. The service was slow.\nThe food was great. But the service was slow.".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_dataset_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("train.jsonl");
        let mut file = std::fs::File::create(&input).unwrap();
        writeln!(
            file,
            r#"{{"text": "{SENTENCE}", "labels": [["food", "food quality", "positive", "great"], ["service", "service general", "negative", "slow"]]}}"#
        )
        .unwrap();
        drop(file);

        let raw = dir.path().join("raw_output.txt");
        let final_path = dir.path().join("output.txt");
        let dataset = JsonDataset::open(&input).unwrap();
        let mut sink = AppendFileSink::open(&raw, &final_path).unwrap();

        let report = RunBatchUseCase::new(
            Arc::new(StubGateway),
            SplitParams::default(),
            BatchParams::default(),
        )
        .execute(&dataset, &mut sink, RunBatchInput::new(0, 1))
        .await
        .unwrap();
        drop(sink);

        assert_eq!(report.processed, 1);

        let raw_lines: Vec<String> = std::fs::read_to_string(&raw)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(raw_lines.len(), 10);
        assert!(raw_lines.iter().all(|line| line
            == &format!("{SENTENCE}####The food was great. The service was slow.")));

        let final_content = std::fs::read_to_string(&final_path).unwrap();
        let final_lines: Vec<&str> = final_content.lines().collect();
        assert_eq!(final_lines.len(), 2);
        assert!(final_lines.iter().all(|line| line.starts_with(&format!("{SENTENCE}####"))));
    }
}
