//! Generate static files

use anyhow::Result;

use crate::content::PostStore;
use crate::generator::Generator;
use crate::Folio;

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let store = PostStore::for_site(folio);
    let generator = Generator::new(folio)?;
    let count = generator.generate(&store)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts in {:.2}s",
        count,
        duration.as_secs_f64()
    );

    Ok(())
}
