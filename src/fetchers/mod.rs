mod http_page;
mod page_source;
pub mod roster;
pub mod rounds;
mod static_page;

pub use http_page::HttpPageSource;
pub use page_source::{ElementSnapshot, PageSource};
pub use roster::{Roster, RosterScraper};
pub use rounds::{RoundScraper, classify_outcome};
pub use static_page::{StaticPage, StaticPageSource};
