// Service implementations of the fetcher and translator traits
pub mod google;
pub mod typefit;

pub use google::GoogleTranslator;
pub use typefit::TypeFitSource;
