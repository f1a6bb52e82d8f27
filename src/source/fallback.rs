use crate::error::Result;
use crate::types::config::FallbackSettings;
use crate::types::observation::{LunarObservation, ObservationSource};
use chrono::{DateTime, Utc};

use super::AstronomySource;

pub fn fallback_observation(settings: &FallbackSettings, observed_at: DateTime<Utc>) -> LunarObservation {
    LunarObservation::new(
        settings.phase.as_str(),
        settings.illumination_percent,
        settings.distance_km,
        observed_at,
    )
    .with_location("Fallback")
}

/// Fetches a live observation, substituting the fallback on upstream failure.
///
/// `Ok(None)` means the upstream failed and the fallback is disabled; the
/// caller should render the unavailable state. Non-upstream errors propagate.
pub fn observe<S: AstronomySource>(
    source: Result<S>,
    settings: &FallbackSettings,
    now: DateTime<Utc>,
) -> Result<Option<(LunarObservation, ObservationSource)>> {
    let failure = match source.and_then(|source| source.fetch()) {
        Ok(observation) => return Ok(Some((observation, ObservationSource::Live))),
        Err(err) if err.is_upstream() => err,
        Err(err) => return Err(err),
    };

    if settings.enabled {
        tracing::warn!(error = %failure, "astronomy source failed; using fallback observation");
        Ok(Some((fallback_observation(settings, now), ObservationSource::Fallback)))
    } else {
        tracing::warn!(error = %failure, "astronomy source failed; fallback disabled");
        Ok(None)
    }
}
