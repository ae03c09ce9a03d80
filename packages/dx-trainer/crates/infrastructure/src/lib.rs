pub mod loader;
pub mod stores;

pub use loader::template_dir::TemplateDirectory;
pub use stores::file::FileCaseStore;
pub use stores::memory::InMemoryCaseStore;
