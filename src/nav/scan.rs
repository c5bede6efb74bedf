//! The level scan loop.

use super::{Match, Scan, ScanRequest, ScanResult};
use crate::error::Result;
use crate::source::LevelSource;
use tracing::{debug, trace};

/// Walk `source` from its current unit until `request` is satisfied or a
/// boundary stops the walk.
///
/// Units are compared against the *current level*, which starts as the level
/// of the starting unit and becomes the level of each accepted match. Every
/// unit that is visited but not the final match lands in the history, except
/// blank lines (skipped unless the scan started on one), units with unknown
/// level, and the shallower unit that ends a bounded scan.
///
/// When the walk ends before `repeat` matches were accepted, the last accepted
/// match is still the result; only a walk with no accepted match at all is
/// [`ScanResult::NotFound`].
pub fn scan<L: LevelSource>(source: &mut L, request: &ScanRequest) -> Result<Scan<L::Position>> {
    let start = source.current()?;
    let mut history = Vec::new();

    let Some(mut current_level) = start.level else {
        debug!("starting unit has no level");
        return Ok(Scan {
            result: ScanResult::NotFound,
            history,
        });
    };
    let started_blank = start.blank;
    let mut remaining = request.repeat;
    let mut found = None;

    loop {
        if !source.move_by(request.direction)? {
            trace!("reached document edge");
            break;
        }
        let unit = source.current()?;
        let Some(level) = unit.level else {
            trace!("unit without level ends the scan");
            break;
        };
        if unit.blank && !started_blank {
            continue;
        }

        if request.comparison.matches(level, current_level) {
            current_level = level;
            found = Some(Match {
                position: unit.position,
                level,
                text: unit.text,
            });
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        } else if level < current_level && request.bounded {
            trace!(level, current_level, "left the block");
            break;
        }
        history.push(level);
    }

    let result = match found {
        Some(found) => ScanResult::Found(found),
        None => ScanResult::NotFound,
    };
    Ok(Scan { result, history })
}
