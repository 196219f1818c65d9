//! Nearest-neighbour ordering for a single vehicle.

use loadline_core::DistanceMatrix;
use thiserror::Error;

/// A visiting order and its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Matrix indices in visiting order, starting at the origin.
    pub order: Vec<usize>,
    /// Sum of matrix entries along `order`.
    pub total_distance_km: f64,
}

/// Errors returned by [`sequence`] and [`sequence_to`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The origin index is not a matrix node.
    #[error("origin {origin} is outside a matrix of {len} nodes")]
    OriginOutOfRange {
        /// Requested origin.
        origin: usize,
        /// Matrix size.
        len: usize,
    },
    /// The end index is not a matrix node.
    #[error("end {end} is outside a matrix of {len} nodes")]
    EndOutOfRange {
        /// Requested end.
        end: usize,
        /// Matrix size.
        len: usize,
    },
}

/// Order every node of `matrix` by nearest neighbour from `origin`.
///
/// Starting at `origin`, the closest unvisited node is appended until none
/// remain; ties go to the lowest index. With `return_to_origin` the origin is
/// appended once more and its closing leg counted.
///
/// This is a greedy O(N²) construction. It gives no optimality guarantee and
/// can be noticeably worse than the best tour on adversarial layouts.
///
/// # Errors
/// Returns [`SequenceError::OriginOutOfRange`] when `origin` is not a node.
///
/// # Examples
/// ```
/// use loadline_core::DistanceMatrix;
/// use loadline_solver::sequence;
///
/// let matrix = DistanceMatrix::try_from_rows(vec![
///     vec![0.0, 5.0, 2.0],
///     vec![5.0, 0.0, 4.0],
///     vec![2.0, 4.0, 0.0],
/// ])?;
/// let tour = sequence(&matrix, 0, true)?;
/// assert_eq!(tour.order, vec![0, 2, 1, 0]);
/// assert_eq!(tour.total_distance_km, 11.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn sequence(
    matrix: &DistanceMatrix,
    origin: usize,
    return_to_origin: bool,
) -> Result<Sequence, SequenceError> {
    check_origin(matrix, origin)?;
    let mut tour = nearest_neighbour(matrix, origin, None);
    if return_to_origin {
        close(matrix, &mut tour, origin);
    }
    Ok(tour)
}

/// Order every node except `end` by nearest neighbour, then finish at `end`.
///
/// Used for open routes with a fixed destination. When `end == origin` the
/// result is the closed tour [`sequence`] would produce.
///
/// # Errors
/// Returns [`SequenceError`] when either index is not a node.
pub fn sequence_to(
    matrix: &DistanceMatrix,
    origin: usize,
    end: usize,
) -> Result<Sequence, SequenceError> {
    check_origin(matrix, origin)?;
    if end >= matrix.len() {
        return Err(SequenceError::EndOutOfRange {
            end,
            len: matrix.len(),
        });
    }
    let mut tour = nearest_neighbour(matrix, origin, Some(end));
    close(matrix, &mut tour, end);
    Ok(tour)
}

const fn check_origin(matrix: &DistanceMatrix, origin: usize) -> Result<(), SequenceError> {
    if origin < matrix.len() {
        Ok(())
    } else {
        Err(SequenceError::OriginOutOfRange {
            origin,
            len: matrix.len(),
        })
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "tour length accumulates floating-point legs"
)]
fn nearest_neighbour(matrix: &DistanceMatrix, origin: usize, skip: Option<usize>) -> Sequence {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut mark = |idx: usize| {
        if let Some(slot) = visited.get_mut(idx) {
            *slot = true;
        }
    };
    mark(origin);
    if let Some(end) = skip {
        mark(end);
    }

    let mut order = Vec::with_capacity(n + 1);
    order.push(origin);
    let mut total = 0.0;
    let mut current = origin;
    loop {
        let next = (0..n)
            .filter(|&idx| !visited.get(idx).copied().unwrap_or(true))
            .filter_map(|idx| matrix.get(current, idx).map(|km| (idx, km)))
            .fold(None, |best: Option<(usize, f64)>, candidate| match best {
                Some((_, best_km)) if best_km <= candidate.1 => best,
                _ => Some(candidate),
            });
        let Some((idx, km)) = next else { break };
        if let Some(slot) = visited.get_mut(idx) {
            *slot = true;
        }
        order.push(idx);
        total += km;
        current = idx;
    }
    Sequence {
        order,
        total_distance_km: total,
    }
}

#[expect(clippy::float_arithmetic, reason = "adds the closing leg")]
fn close(matrix: &DistanceMatrix, tour: &mut Sequence, to: usize) {
    let from = tour.order.last().copied().unwrap_or(to);
    tour.total_distance_km += matrix.leg(from, to);
    tour.order.push(to);
}
