mod config;
pub mod manual;
pub mod spin;

use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

pub use crate::config::*;
pub use crate::spin::SpinSequence;

fn identity_values<'a>(
    table: &'a Table,
    identity_column: &str,
) -> Result<HashSet<&'a str>, RaffleErrors> {
    let idx = table
        .column_index(identity_column)
        .ok_or_else(|| RaffleErrors::MissingIdentityColumn(identity_column.to_string()))?;
    Ok(table.rows.iter().map(|r| r[idx].as_str()).collect())
}

/// Projects the set of participants still eligible for a draw: every row
/// whose identity cell does not appear in the winner history.
///
/// This is a pure function, recomputed on every load and never persisted.
/// Matching is exact string equality, with no trimming or case folding.
pub fn active_pool(
    participants: &Table,
    history: &Table,
    identity_column: &str,
) -> Result<Table, RaffleErrors> {
    if history.is_empty() {
        return Ok(participants.clone());
    }
    let idx = participants
        .column_index(identity_column)
        .ok_or_else(|| RaffleErrors::MissingIdentityColumn(identity_column.to_string()))?;
    let won = identity_values(history, identity_column)?;
    let rows: Vec<Vec<String>> = participants
        .rows
        .iter()
        .filter(|r| !won.contains(r[idx].as_str()))
        .cloned()
        .collect();
    debug!(
        "active_pool: {} of {} participants eligible ({} prior winners)",
        rows.len(),
        participants.len(),
        won.len()
    );
    Ok(Table {
        columns: participants.columns.clone(),
        rows,
    })
}

/// Draws one row uniformly at random from the pool.
///
/// Duplicate rows count once each, so a person entered twice has twice the
/// odds. This is the single authoritative selection: any preview frames
/// shown before it come from [spin::SpinSequence] and have no effect on
/// the outcome.
pub fn draw<R: Rng>(pool: &Table, rng: &mut R) -> Result<Vec<String>, RaffleErrors> {
    if pool.is_empty() {
        return Err(RaffleErrors::EmptyPool);
    }
    let idx = rng.gen_range(0..pool.len());
    Ok(pool.rows[idx].clone())
}

/// Records a committed winner: appends the winning row at the end of the
/// history and removes every participant row sharing the winner's
/// identity, not just the sampled instance.
///
/// Rows that are not removed keep their relative order and content.
/// Persisting the returned tables is the caller's responsibility.
pub fn commit(
    winner: &[String],
    participants: &Table,
    history: &Table,
    identity_column: &str,
) -> Result<(Table, Table), RaffleErrors> {
    let idx = participants
        .column_index(identity_column)
        .ok_or_else(|| RaffleErrors::MissingIdentityColumn(identity_column.to_string()))?;
    let winner_id = winner
        .get(idx)
        .ok_or(RaffleErrors::RaggedRow {
            row: 0,
            expected: participants.columns.len(),
            found: winner.len(),
        })?
        .as_str();

    let remaining: Vec<Vec<String>> = participants
        .rows
        .iter()
        .filter(|r| r[idx] != winner_id)
        .cloned()
        .collect();
    let removed = participants.len() - remaining.len();
    info!(
        "commit: winner {:?}, removed {} participant row(s)",
        winner_id, removed
    );

    let mut new_history = history.clone();
    new_history.rows.push(winner.to_vec());

    Ok((
        Table {
            columns: participants.columns.clone(),
            rows: remaining,
        },
        new_history,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn person_table(names: &[&str]) -> Table {
        Table {
            columns: vec!["CONTROL NO.".to_string(), "FULL NAME".to_string()],
            rows: names
                .iter()
                .enumerate()
                .map(|(i, n)| vec![format!("{:03}", i + 1), n.to_string()])
                .collect(),
        }
    }

    #[test]
    fn active_pool_passes_through_on_empty_history() {
        let participants = person_table(&["Alice", "Bob"]);
        let history = Table::empty(&participants.columns);
        let active = active_pool(&participants, &history, "FULL NAME").unwrap();
        assert_eq!(active, participants);
    }

    #[test]
    fn active_pool_excludes_prior_winners() {
        let participants = person_table(&["Alice", "Bob", "Clara"]);
        let mut history = Table::empty(&participants.columns);
        history.rows.push(vec!["999".to_string(), "Bob".to_string()]);
        let active = active_pool(&participants, &history, "FULL NAME").unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.rows.iter().all(|r| r[1] != "Bob"));
    }

    #[test]
    fn active_pool_is_idempotent() {
        let participants = person_table(&["Alice", "Bob", "Alice"]);
        let mut history = Table::empty(&participants.columns);
        history
            .rows
            .push(vec!["001".to_string(), "Alice".to_string()]);
        let a = active_pool(&participants, &history, "FULL NAME").unwrap();
        let b = active_pool(&participants, &history, "FULL NAME").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn active_pool_matching_is_exact() {
        let participants = person_table(&["Alice", "alice", " Alice"]);
        let mut history = Table::empty(&participants.columns);
        history
            .rows
            .push(vec!["001".to_string(), "Alice".to_string()]);
        let active = active_pool(&participants, &history, "FULL NAME").unwrap();
        // Only the exact match is excluded, not case or whitespace variants.
        assert_eq!(active.len(), 2);
    }

    #[test]
    fn draw_returns_a_row_from_the_pool() {
        let pool = person_table(&["Alice", "Bob", "Clara"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let row = draw(&pool, &mut rng).unwrap();
            assert!(pool.rows.contains(&row));
        }
    }

    #[test]
    fn draw_fails_on_empty_pool() {
        let pool = Table::empty(&["FULL NAME".to_string()]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(draw(&pool, &mut rng), Err(RaffleErrors::EmptyPool));
    }

    #[test]
    fn commit_removes_every_duplicate_of_the_winner() {
        // pool = [A, B, A]: a win for A removes both A rows.
        let participants = person_table(&["A", "B", "A"]);
        let history = Table::empty(&participants.columns);
        let winner = participants.rows[0].clone();
        let (p2, h2) = commit(&winner, &participants, &history, "FULL NAME").unwrap();
        assert_eq!(p2.len(), 1);
        assert_eq!(p2.rows[0][1], "B");
        assert_eq!(h2.len(), 1);
        assert_eq!(h2.rows[0], winner);
    }

    #[test]
    fn commit_appends_at_the_end_and_preserves_order() {
        let participants = person_table(&["Alice", "Bob", "Clara", "Dan"]);
        let mut history = Table::empty(&participants.columns);
        history.rows.push(vec!["009".to_string(), "Zoe".to_string()]);
        let winner = participants.rows[2].clone();
        let (p2, h2) = commit(&winner, &participants, &history, "FULL NAME").unwrap();
        // Prior history entry untouched, winner last.
        assert_eq!(h2.rows[0][1], "Zoe");
        assert_eq!(h2.rows[1], winner);
        // Remaining participants keep their relative order.
        let names: Vec<&str> = p2.rows.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Dan"]);
    }

    #[test]
    fn full_cycle_with_duplicates() {
        let participants = person_table(&["A", "B", "A"]);
        let history = Table::empty(&participants.columns);
        let active = active_pool(&participants, &history, "FULL NAME").unwrap();
        assert_eq!(active.len(), 3);
        let mut rng = StdRng::seed_from_u64(1);
        let winner = draw(&active, &mut rng).unwrap();
        let (p2, h2) = commit(&winner, &participants, &history, "FULL NAME").unwrap();
        if winner[1] == "A" {
            assert_eq!(p2.len(), 1);
            assert_eq!(p2.rows[0][1], "B");
        } else {
            assert_eq!(p2.len(), 2);
        }
        assert_eq!(h2.len(), 1);
        // The winner can never be drawn again.
        let active2 = active_pool(&p2, &h2, "FULL NAME").unwrap();
        assert!(active2.rows.iter().all(|r| r[1] != winner[1]));
    }

    #[test]
    fn validate_catches_ragged_rows() {
        let mut t = person_table(&["Alice"]);
        t.rows.push(vec!["002".to_string()]);
        assert_eq!(
            t.validate("FULL NAME"),
            Err(RaffleErrors::RaggedRow {
                row: 2,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn validate_requires_the_identity_column() {
        let t = person_table(&["Alice"]);
        assert_eq!(
            t.validate("NAME"),
            Err(RaffleErrors::MissingIdentityColumn("NAME".to_string()))
        );
    }
}
