//! Step classification and construction

use rf_outcome::{GridDims, Step, StepMeta, StepType};

use super::grid::transpose_grid;
use super::win::map_line_wins;
use crate::error::IngestError;
use crate::raw::RoundRecord;

/// Classify a step by its position in the round.
///
/// Step 0 is the base spin; everything after it is a feature step.
/// Respins and free-spin steps are not told apart yet.
pub fn classify_step(step_index: usize) -> StepType {
    if step_index == 0 {
        StepType::Base
    } else {
        StepType::FeatureStep
    }
}

fn prefix_step(step_index: usize, err: IngestError) -> IngestError {
    match err {
        IngestError::InvalidRawSchema(msg) => {
            IngestError::invalid(format!("step {}: {}", step_index, msg))
        }
        other => other,
    }
}

/// Build a canonical step from one raw round record
pub fn build_step(
    step_index: usize,
    record: &RoundRecord,
    request_key: &str,
    dims: GridDims,
) -> Result<Step, IngestError> {
    let spin = &record.spin_result;
    let grid_after = transpose_grid(&spin.grid, dims).map_err(|e| prefix_step(step_index, e))?;
    let wins = map_line_wins(&spin.lines, dims).map_err(|e| prefix_step(step_index, e))?;

    let step_type = classify_step(step_index);
    let meta = StepMeta {
        step_type,
        step_index,
        request_key: request_key.to_string(),
        sticky_wilds: spin.sticky_wilds.clone(),
        scatter_count: spin.scatter_count,
        trigger_free_game: spin.trigger_free_game,
    };

    Ok(Step {
        index: step_index,
        grid_after,
        wins,
        removed_positions: Vec::new(),
        meta,
    })
}
