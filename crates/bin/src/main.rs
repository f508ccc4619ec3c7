//! Demo run against the pixels canvas service.
//!
//! Reads the canvas size, optionally writes one pixel (`pixels <x> <y>
//! <hex>`), then fetches the canvas and a reference pixel concurrently and
//! saves the canvas as a PNG.

use anyhow::Context;
use client::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,client=debug")),
        )
        .init();

    info!("pixels client v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load()?;
    let token = config.token()?;
    info!("Service: {}", config.service.base_url);

    let mut client = Client::connect(config.service.base_url.clone(), token);

    let size = client.get_size().await?;
    info!("Canvas is {}x{}", size.width, size.height);

    if let Some(pixel) = pixel_from_args()? {
        let reply = client.set_pixel(pixel).await?;
        info!("Wrote {} at ({}, {}): {:?}", pixel.color, pixel.x, pixel.y, reply);
    }

    let (canvas, reference) = futures_util::future::try_join(
        client.get_pixels(size),
        client.get_pixel(0, 0),
    )
    .await?;
    info!("Pixel (0, 0) is {}", reference.color);

    save_png(&canvas, &config.service.output)?;
    info!("Canvas written to {}", config.service.output);

    client.close();
    Ok(())
}

/// Optional `<x> <y> <hex>` positional arguments for a pixel write.
fn pixel_from_args() -> anyhow::Result<Option<protocol::Pixel>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(None),
        [x, y, hex] => {
            let x = x.parse().context("x must be an integer")?;
            let y = y.parse().context("y must be an integer")?;
            let pixel = protocol::Pixel::from_hex(x, y, hex)?;
            Ok(Some(pixel))
        }
        _ => anyhow::bail!("usage: pixels [<x> <y> <rrggbb>]"),
    }
}

/// Hand the decoded canvas to the image crate and write a PNG.
fn save_png(canvas: &protocol::Canvas, path: &str) -> anyhow::Result<()> {
    let size = canvas.size();
    let mut out = image::RgbImage::new(size.width, size.height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let color = canvas.get(x, y).context("canvas lookup out of bounds")?;
        *px = image::Rgb([color.r, color.g, color.b]);
    }
    out.save(path)
        .with_context(|| format!("failed to write {path}"))?;
    Ok(())
}
