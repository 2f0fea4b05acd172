use cube_core::Move;
use log::trace;

/// Shorten a move sequence without changing what it does to the cube.
///
/// Starting at each move, scan forward over the run of moves on the same layer, stepping over moves of the parallel
/// layer since they commute with the run. Turns that add up to a multiple of four cancel out entirely and three
/// quarter turns become one reverse turn. After every reduction the scan restarts from the beginning since moves that
/// used to be separated may now be next to each other.
#[must_use]
pub fn minimize(moves: &[Move]) -> Vec<Move> {
    let mut moves = moves.to_vec();
    let mut ix = 0;

    while ix < moves.len() {
        let current = moves[ix];
        let mut count = 1_i32;
        let mut run = Vec::new();

        for (j, &mv) in moves.iter().enumerate().skip(ix + 1) {
            if mv == current {
                count += 1;
            } else if mv == current.reverse() {
                count -= 1;
            } else if current.opposite_side().contains(&mv) {
                continue;
            } else {
                break;
            }

            run.push(j);
        }

        match count.rem_euclid(4) {
            0 => {
                trace!("{current} run of {} cancels out", run.len() + 1);

                remove_all(&mut moves, &run);
                moves.remove(ix);
                ix = 0;
            }
            3 => {
                trace!("{current} run of {} becomes {}", run.len() + 1, current.reverse());

                remove_all(&mut moves, &run);
                moves[ix] = current.reverse();
                ix = 0;
            }
            _ => ix += 1,
        }
    }

    moves
}

/// Remove the given ascending indices
fn remove_all(moves: &mut Vec<Move>, indices: &[usize]) {
    for &i in indices.iter().rev() {
        moves.remove(i);
    }
}

#[cfg(test)]
mod tests {
    use cube_core::{CubeState, Move};
    use pretty_assertions::assert_eq;

    use super::minimize;

    const R: Move = Move::R;
    const R_: Move = Move::R_PRIME;
    const L: Move = Move::L;
    const L_: Move = Move::L_PRIME;
    const U: Move = Move::U;
    const U_: Move = Move::U_PRIME;
    const F: Move = Move::F;

    #[test]
    fn three_quarter_turns_become_one_reverse() {
        assert_eq!(minimize(&[R, R, R]), vec![R_]);
        assert_eq!(minimize(&[R_, R_, R_]), vec![R]);
    }

    #[test]
    fn inverses_cancel() {
        assert_eq!(minimize(&[R, R_]), Vec::<Move>::new());
        assert_eq!(minimize(&[U, U_]), Vec::<Move>::new());
        assert_eq!(minimize(&[R, R, R, R]), Vec::<Move>::new());
        assert_eq!(minimize(&[]), Vec::<Move>::new());
    }

    #[test]
    fn opposite_side_is_skipped() {
        assert_eq!(minimize(&[R, L, R_]), vec![L]);
        assert_eq!(minimize(&[R, L, L_, R]), vec![R, R]);
        assert_eq!(minimize(&[R, L, R, L, R]), vec![R_, L, L]);
    }

    #[test]
    fn other_faces_end_the_run() {
        assert_eq!(minimize(&[R, U, R_]), vec![R, U, R_]);
        assert_eq!(minimize(&[R, R]), vec![R, R]);
    }

    #[test]
    fn cancellation_cascades() {
        assert_eq!(minimize(&[F, R, U, U_, R_, F]), vec![F, F]);
        assert_eq!(
            minimize(&[R, U, F, Move::F_PRIME, U_, R_]),
            Vec::<Move>::new()
        );
    }

    #[test]
    fn equivalent_and_idempotent() {
        let mut rng = fastrand::Rng::with_seed(0xc0be);
        let solved = CubeState::solved();

        // A few faces make runs and cancellations common, all twelve cover every opposite pair
        let few: &[Move] = &[R, R_, L, L_, U, U_];

        for pool in [few, &Move::ALL[..]] {
            for _ in 0..500 {
                let moves = (0..rng.usize(0..30))
                    .map(|_| pool[rng.usize(..pool.len())])
                    .collect::<Vec<_>>();

                let minimized = minimize(&moves);

                assert!(minimized.len() <= moves.len());
                assert_eq!(solved.apply_all(&minimized), solved.apply_all(&moves));
                assert_eq!(minimize(&minimized), minimized);
            }
        }
    }
}
