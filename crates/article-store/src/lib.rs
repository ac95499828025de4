pub mod articles;
pub mod db;
pub mod models;

pub use articles::SqliteArticleStore;
pub use db::ArticleDb;
pub use models::{ArticleFilter, ArticleRow};
