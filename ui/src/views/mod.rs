mod journal;
pub use journal::JournalPage;
