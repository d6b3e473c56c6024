use std::cmp::Reverse;

use itertools::Itertools;
use rayon::prelude::*;

use crate::analysis::evaluate_profile;
use crate::config::{InstrumentSpec, Pips};
use crate::data::{BarFeed, LivePrice};
use crate::domain::{Direction, FibRatio, Profile};
use crate::error::EvalError;
use crate::models::{Alignment, Bias, EvaluatedProfile, Finding, FusionResult};

/// Evaluates every profile and fuses the survivors into one directional
/// verdict.
///
/// Member evaluations are independent and run in parallel. A profile that
/// fails with `InsufficientData` is skipped (and logged), not fatal; zero
/// survivors is `NoData`.
pub fn evaluate_fusion<F>(
    profiles: &[Profile],
    feed: &F,
    live: Option<LivePrice>,
    instrument: &InstrumentSpec,
) -> Result<FusionResult, EvalError>
where
    F: BarFeed + Sync,
{
    let evaluated: Vec<EvaluatedProfile> = profiles
        .par_iter()
        .filter_map(|p| match evaluate_profile(p, feed, live, instrument) {
            Ok(e) => Some(e),
            Err(err) => {
                log::warn!("{} skipped: {}", p, err);
                None
            }
        })
        .collect();

    fuse(evaluated, instrument)
}

/// Pure aggregation over already-evaluated profiles.
pub(crate) fn fuse(
    evaluated: Vec<EvaluatedProfile>,
    instrument: &InstrumentSpec,
) -> Result<FusionResult, EvalError> {
    // Descending weight, ascending id: the head is the primary profile.
    let members: Vec<EvaluatedProfile> = evaluated
        .into_iter()
        .sorted_by_key(|e| (Reverse(e.weight()), e.profile.id))
        .collect();
    let Some(primary) = members.first().cloned() else {
        return Err(EvalError::NoData);
    };

    let (score_buy, score_sell) =
        members
            .iter()
            .fold((0u32, 0u32), |(buy, sell), e| match e.profile.direction {
                Direction::Buy => (buy + e.fusion_score(), sell),
                Direction::Sell => (buy, sell + e.fusion_score()),
            });

    let bias = if score_buy > score_sell {
        Bias::Buy
    } else if score_sell > score_buy {
        Bias::Sell
    } else {
        // A tie stays a tie; the primary's side is display context only.
        Bias::Mixed {
            htf_side: primary.profile.direction,
        }
    };

    let mut findings = Vec::new();
    let lower: Vec<&EvaluatedProfile> = members
        .iter()
        .filter(|e| e.weight() < primary.weight())
        .collect();

    if lower.is_empty() {
        findings.push(Finding::NoLowerProfiles);
    } else {
        let aligned = lower
            .iter()
            .filter(|e| e.profile.direction == primary.profile.direction)
            .count();
        let alignment = if aligned == lower.len() {
            Alignment::FullyAligned
        } else if aligned == 0 {
            Alignment::FullyOpposed
        } else if aligned * 2 > lower.len() {
            Alignment::MajorityAlignedMixed
        } else {
            // An even split reads as opposition; the warning should not
            // soften on a tie.
            Alignment::MajorityOpposed
        };
        findings.push(Finding::Alignment(alignment));

        for member in &lower {
            if let Some(found) = closest_confluence(member, &primary, instrument) {
                findings.push(found);
            }
        }
    }

    log::debug!(
        "fusion over {} member(s): buy {} vs sell {} -> {}",
        members.len(),
        score_buy,
        score_sell,
        bias
    );

    Ok(FusionResult {
        bias,
        primary,
        members,
        score_buy,
        score_sell,
        findings,
    })
}

/// Closest pairing between a lower profile's deep extensions and the
/// primary's key zones, reported only inside the confluence band.
fn closest_confluence(
    lower: &EvaluatedProfile,
    primary: &EvaluatedProfile,
    instrument: &InstrumentSpec,
) -> Option<Finding> {
    let mut best: Option<(FibRatio, FibRatio, Pips)> = None;
    for deep in FibRatio::DEEP {
        for zone in FibRatio::KEY_ZONES {
            let dist =
                instrument.pips_between(lower.levels.price(deep), primary.levels.price(zone));
            if best.is_none_or(|(_, _, d)| dist < d) {
                best = Some((deep, zone, dist));
            }
        }
    }
    let (deep, zone, distance) = best?;
    (distance <= instrument.confluence_band).then_some(Finding::Confluence {
        profile: lower.profile.id,
        deep,
        zone,
        distance,
    })
}
