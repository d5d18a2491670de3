// crate modules
use crate::error::{Error, Result};

// hydromesh modules
use hydromesh_utils::f;

// external crates
use kdam::{Bar, BarBuilder, BarExt};

/// Initialise a progress bar over `total` items, if wanted
pub(crate) fn init_progress_bar(total: usize, unit: &str, disable: bool) -> Result<Bar> {
    let mut bar = BarBuilder::default()
        .total(total)
        .unit(f!(" {unit}"))
        .disable(disable)
        .bar_format(f!("{{count}}/{{total}} {unit} [{{percentage:.0}}%]   "))
        .build()
        .map_err(|e| Error::ProgressBar(f!("{e:?}")))?;

    if !disable {
        bar.refresh()?;
    }
    Ok(bar)
}
