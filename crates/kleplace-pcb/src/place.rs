use kleplace_core::{PlacedKey, Point};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    resolve_primary_position, resolve_secondary_position, Board, ComponentRef, PcbError,
    PlacementConfig, RefMatcher, Severity,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SecondaryOutcome {
    pub reference: String,
    pub position: Point,
    /// Whether the component had to be flipped to reach the back side.
    pub flipped_now: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlacedFootprint {
    pub label: String,
    pub reference: String,
    pub position: Point,
    pub secondary: Option<SecondaryOutcome>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PlacementReport {
    pub placed: Vec<PlacedFootprint>,
    /// Labels without a matching primary footprint.
    pub missing_primaries: Vec<String>,
    /// Primary references without a paired secondary footprint.
    pub missing_secondaries: Vec<String>,
}

impl PlacementReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_primaries.is_empty() && self.missing_secondaries.is_empty()
    }
}

/// Turns parsed keys into footprint moves on a [`Board`].
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    config: PlacementConfig,
    matcher: RefMatcher,
}

impl LayoutResolver {
    pub fn new(config: PlacementConfig) -> Result<Self, PcbError> {
        config.validate()?;
        let matcher = RefMatcher::from_config(&config)?;
        Ok(Self { config, matcher })
    }

    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    #[must_use]
    pub fn matcher(&self) -> &RefMatcher {
        &self.matcher
    }

    #[must_use]
    pub fn primary_position(&self, key: &PlacedKey) -> Point {
        resolve_primary_position(key, self.config.pitch)
    }

    #[must_use]
    pub fn secondary_position(&self, primary: Point) -> Point {
        resolve_secondary_position(primary, &self.config.secondary, self.config.pitch)
    }

    /// Place every key, then refresh the view once.
    ///
    /// A key without a primary footprint is skipped; a primary without a
    /// secondary is placed alone. Both cases are reported to the user and
    /// collected in the returned report. Host errors abort the run.
    pub fn place<B: Board + ?Sized>(
        &self,
        board: &mut B,
        keys: &[PlacedKey],
    ) -> Result<PlacementReport, PcbError> {
        let footprints = board.footprints();
        let mut report = PlacementReport::default();

        for key in keys {
            let Some(primary) = self.matcher.match_primary(&key.label, &footprints) else {
                let message = format!("No footprint found for key \"{}\"", key.label.trim());
                warn!(label = %key.label, "{message}");
                board.notify_user(&message, Severity::Warning);
                report.missing_primaries.push(key.label.clone());
                continue;
            };

            let position = self.primary_position(key);
            board.set_position(primary, position.x, position.y)?;
            debug!(
                label = %key.label,
                reference = %primary.reference,
                x = position.x,
                y = position.y,
                "placed primary"
            );

            let secondary = match self.matcher.match_secondary(primary, &footprints) {
                Some(secondary) => Some(self.place_secondary(board, secondary, position)?),
                None => {
                    let message = format!(
                        "No {} footprint found for {} ({})",
                        self.matcher.secondary.prefix(),
                        primary.reference,
                        primary.value.trim()
                    );
                    warn!(reference = %primary.reference, "{message}");
                    board.notify_user(&message, Severity::Warning);
                    report.missing_secondaries.push(primary.reference.clone());
                    None
                }
            };

            report.placed.push(PlacedFootprint {
                label: key.label.clone(),
                reference: primary.reference.clone(),
                position,
                secondary,
            });
        }

        board.refresh_view();
        info!(
            placed = report.placed.len(),
            missing_primaries = report.missing_primaries.len(),
            missing_secondaries = report.missing_secondaries.len(),
            "placement finished"
        );
        Ok(report)
    }

    fn place_secondary<B: Board + ?Sized>(
        &self,
        board: &mut B,
        secondary: &ComponentRef,
        primary: Point,
    ) -> Result<SecondaryOutcome, PcbError> {
        let target = self.secondary_position(primary);

        let flipped_now = !board.is_flipped(secondary)?;
        if flipped_now {
            board.flip(secondary)?;
        }
        board.set_position(secondary, target.x, target.y)?;
        board.set_orientation_degrees(secondary, target.r)?;
        debug!(
            reference = %secondary.reference,
            x = target.x,
            y = target.y,
            angle = target.r,
            flipped_now,
            "placed secondary"
        );

        Ok(SecondaryOutcome {
            reference: secondary.reference.clone(),
            position: target,
            flipped_now,
        })
    }
}

/// Convenience wrapper: build a [`LayoutResolver`] from `config` and place
/// `keys` on `board`.
pub fn place_layout<B: Board + ?Sized>(
    board: &mut B,
    keys: &[PlacedKey],
    config: &PlacementConfig,
) -> Result<PlacementReport, PcbError> {
    LayoutResolver::new(config.clone())?.place(board, keys)
}
