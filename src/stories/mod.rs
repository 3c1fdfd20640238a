mod front_page;
mod scheduler;
mod story;
#[cfg(test)]
pub(crate) mod testing;

pub use front_page::{FrontPage, TopStories};
pub use story::{RankedStory, Story};
