//! Dataset adapters implementing the [`RecordSource`](atoss_application::RecordSource) port.

mod json_dataset;

pub use json_dataset::JsonDataset;
