//! Progress reporters implementing [`BatchProgressNotifier`](atoss_application::BatchProgressNotifier)

pub mod reporter;
