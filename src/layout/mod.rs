//! Table-of-contents layout.
//!
//! Pure arithmetic over page counts: nothing in here touches PDF objects.

mod metrics;
mod options;
mod toc;

pub use metrics::{leader_line, text_width, LeaderLine};
pub use options::{OverflowPolicy, PageSize, TocOptions};
pub use toc::{TocLayout, TocLine};
