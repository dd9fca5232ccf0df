//! Distance matrix ingestion
//!
//! Matrix layout: index 0 is the origin, indices 1..=M are the delivery
//! points in the order supplied, and index M+1 is the destination when one
//! is given.

use tracing::{debug, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::services::routing::{BatchStatus, DistanceProvider, PairDistance};
use crate::types::{Coordinates, DeliveryPoint, Measure};

/// Square grid of travel distances in kilometers
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    cells: Vec<Vec<Measure>>,
}

impl DistanceMatrix {
    /// Create a matrix from explicit rows.
    ///
    /// Rejects non-square grids and known values that are negative or not
    /// finite.
    pub fn from_rows(rows: Vec<Vec<Measure>>) -> PlannerResult<Self> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PlannerError::InvalidInput(format!(
                    "distance matrix must be square: row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, cell) in row.iter().enumerate() {
                if let Measure::Known(km) = cell {
                    if !km.is_finite() || *km < 0.0 {
                        return Err(PlannerError::InvalidNumeric(format!(
                            "distance {} -> {} must be a non-negative finite number, got {}",
                            i, j, km
                        )));
                    }
                }
            }
        }

        Ok(Self { cells: rows })
    }

    /// Create a fully reachable matrix from kilometer values
    pub fn from_km(rows: Vec<Vec<f64>>) -> PlannerResult<Self> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Measure::Known).collect())
                .collect(),
        )
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Distance from index `from` to index `to` in kilometers
    pub fn get(&self, from: usize, to: usize) -> Measure {
        self.cells[from][to]
    }

    pub fn rows(&self) -> &[Vec<Measure>] {
        &self.cells
    }

    /// Number of off-diagonal cells without a known distance
    pub fn unreachable_pairs(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |(j, cell)| i != *j && cell.is_unreachable())
            })
            .count()
    }

    /// Sum of consecutive segments along `path`.
    /// Stops at the first unreachable segment.
    pub fn path_distance(&self, path: &[usize]) -> Measure {
        let mut total = 0.0;
        for leg in path.windows(2) {
            match self.get(leg[0], leg[1]) {
                Measure::Known(km) => total += km,
                Measure::Unreachable => return Measure::Unreachable,
            }
        }
        Measure::Known(total)
    }
}

/// Build the distance matrix for a route with one provider call.
///
/// Per-pair failures degrade to unreachable cells; a failed call, a
/// malformed answer or a non-success top-level status is a
/// [`PlannerError::ProviderFailure`].
pub async fn build_matrix(
    provider: &dyn DistanceProvider,
    origin: Coordinates,
    points: &[DeliveryPoint],
    destination: Option<Coordinates>,
) -> PlannerResult<DistanceMatrix> {
    origin.validate("origin")?;
    for (i, point) in points.iter().enumerate() {
        point.coordinates.validate(&format!("point {} ({})", i, point.name))?;
    }
    if let Some(destination) = &destination {
        destination.validate("destination")?;
    }

    let mut locations = Vec::with_capacity(points.len() + 2);
    locations.push(origin);
    locations.extend(points.iter().map(|p| p.coordinates));
    locations.extend(destination);
    let n = locations.len();

    debug!("Requesting {}x{} distance matrix from {}", n, n, provider.name());

    let response = provider.query_distances(&locations).await.map_err(|e| {
        PlannerError::ProviderFailure(format!("{} request failed: {:#}", provider.name(), e))
    })?;

    if let BatchStatus::Failed { status, message } = response.status {
        return Err(PlannerError::ProviderFailure(match message {
            Some(message) => format!("{} returned status {}: {}", provider.name(), status, message),
            None => format!("{} returned status {}", provider.name(), status),
        }));
    }

    if response.rows.len() != n || response.rows.iter().any(|row| row.len() != n) {
        return Err(PlannerError::ProviderFailure(format!(
            "{} returned a malformed matrix: expected {}x{}, got {} rows",
            provider.name(),
            n,
            n,
            response.rows.len()
        )));
    }

    let mut cells = Vec::with_capacity(n);
    for (i, row) in response.rows.into_iter().enumerate() {
        let mut cells_row = Vec::with_capacity(n);
        for (j, pair) in row.into_iter().enumerate() {
            let cell = match pair {
                PairDistance::Ok { meters } if meters.is_finite() && meters >= 0.0 => {
                    Measure::Known(meters / 1000.0)
                }
                PairDistance::Ok { meters } => {
                    return Err(PlannerError::ProviderFailure(format!(
                        "{} returned invalid distance {} for {} -> {}",
                        provider.name(),
                        meters,
                        i,
                        j
                    )));
                }
                PairDistance::Failed { status } => {
                    if i != j {
                        warn!("No distance for {} -> {}: {}", i, j, status);
                    }
                    Measure::Unreachable
                }
            };
            cells_row.push(cell);
        }
        cells.push(cells_row);
    }

    debug!("Received distance matrix: {}x{}", n, n);

    Ok(DistanceMatrix { cells })
}
