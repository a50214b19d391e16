//! Request dispatch: turn a raw request target into a reply.
//!
//! Each stage either resolves the request and stops, or hands a validated
//! value to the next one:
//!
//! 1. percent-decode the target (failure: 400)
//! 2. validate the path (failure: 400; trailing `/`: ready message)
//! 3. take the query after the first `?` (empty: ready message)
//! 4. read WIDTH and HEIGHT (missing or unparsable: informational)
//! 5. bound the render target (out of range: informational)
//! 6. read BBOX (missing: informational)
//! 7. parse BBOX (malformed or inverted: informational)
//! 8. resolve FORMAT (unsupported: informational)
//! 9. render (failure: 500) and reply with the image
//!
//! Missing or unparsable parameters deliberately get a 200 with guidance
//! rather than an error status. [`WmsError::http_status_code`] decides which
//! failures are which.

use std::time::Instant;

use renderer::{RenderedImage, Renderer};
use tracing::{debug, error, info, warn};
use wms_common::mime::type_to_extension;
use wms_common::{RenderLimits, WmsError, WmsResult};
use wms_protocol::{decode_target, validate_path, PathVerdict, WmsQuery};

use crate::metrics::MetricsCollector;
use crate::reply::{Reply, Status};

pub const READY_MESSAGE: &str = "Ready to accept Query";
pub const BAD_BBOX_MESSAGE: &str = "failed to parse bbox";

const SIZE_PARAMETERS: &str = "width or height";
const BBOX_PARAMETER: &str = "bbox";
const DEFAULT_EXTENSION: &str = "png";

/// How a request that did not fail was resolved.
enum Outcome {
    Ready,
    Image(RenderedImage),
}

/// Run the full pipeline for one request target (path plus optional `?query`).
///
/// Never returns an unset reply. The renderer is only called once every
/// parameter has been validated.
pub fn handle_request(
    raw_target: &str,
    renderer: &dyn Renderer,
    limits: &RenderLimits,
    metrics: &MetricsCollector,
) -> Reply {
    match dispatch(raw_target, renderer, limits, metrics) {
        Ok(Outcome::Ready) => Reply::html(READY_MESSAGE),
        Ok(Outcome::Image(image)) => Reply::image(image.data, image.extension),
        Err(e) => error_reply(&e),
    }
}

/// Build the reply for a failed request.
///
/// Structural failures get a stock error page, everything else a 200 whose
/// body says what was wrong.
pub fn error_reply(err: &WmsError) -> Reply {
    match err.http_status_code() {
        400 => {
            warn!(error = %err, "Rejecting request");
            Reply::stock(Status::BadRequest)
        }
        500 => {
            error!(error = %err, "Request failed");
            Reply::stock(Status::InternalServerError)
        }
        _ => {
            debug!(error = %err, "Answering with guidance");
            Reply::html(&informational_message(err))
        }
    }
}

fn informational_message(err: &WmsError) -> String {
    match err {
        WmsError::MissingParameter(name) => format!("missing {}", name),
        WmsError::InvalidBbox(_) => BAD_BBOX_MESSAGE.to_string(),
        WmsError::TargetOutOfRange {
            max_width,
            max_height,
            ..
        } => format!(
            "width or height out of range: width must be 1 to {}, height 1 to {}",
            max_width, max_height
        ),
        WmsError::UnsupportedFormat(format) => format!("unsupported format: {}", format),
        other => other.to_string(),
    }
}

fn dispatch(
    raw_target: &str,
    renderer: &dyn Renderer,
    limits: &RenderLimits,
    metrics: &MetricsCollector,
) -> WmsResult<Outcome> {
    let decoded = decode_target(raw_target)?;

    let target = match validate_path(&decoded)? {
        PathVerdict::Ready => return Ok(Outcome::Ready),
        PathVerdict::Accept(target) => target,
    };

    if target.query.is_empty() {
        return Ok(Outcome::Ready);
    }

    debug!(query = target.query, "Parsing tile query");
    let query = WmsQuery::parse(target.query);

    let (width, height) = query
        .width()
        .zip(query.height())
        .ok_or_else(|| WmsError::MissingParameter(SIZE_PARAMETERS.to_string()))?;

    let render_target = limits.target(width, height)?;

    let bbox_string = query
        .bbox_string()
        .ok_or_else(|| WmsError::MissingParameter(BBOX_PARAMETER.to_string()))?;

    let bbox = WmsQuery::parse_bbox(bbox_string)
        .ok_or_else(|| WmsError::InvalidBbox(bbox_string.to_string()))?;

    let extension = match query.format() {
        None => DEFAULT_EXTENSION,
        Some(format) => type_to_extension(format)
            .filter(|ext| renderer.supports(ext))
            .ok_or_else(|| WmsError::UnsupportedFormat(format.to_string()))?,
    };

    let started = Instant::now();
    let result = renderer.render(render_target, &bbox, extension);
    let elapsed = started.elapsed();
    metrics.record_render(elapsed);

    let image = result.map_err(|e| WmsError::RenderError(e.to_string()))?;

    info!(
        width,
        height,
        bbox = ?bbox,
        bytes = image.data.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Rendered tile"
    );

    Ok(Outcome::Image(image))
}
