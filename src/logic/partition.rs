//! Slice a shuffled pool into full teams and substitutes.

/// Contiguous team slices plus the leftover tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition<T> {
    pub team_slices: Vec<Vec<T>>,
    pub substitutes: Vec<T>,
}

/// Split `shuffled` into `len / team_size` teams of exactly `team_size`, in order.
///
/// Slice `k` holds elements `[k * team_size, (k + 1) * team_size)`; whatever is
/// left after the last full slice becomes the substitutes. A zero team size
/// yields no teams and puts everyone on the bench.
pub fn partition<T>(shuffled: Vec<T>, team_size: usize) -> Partition<T> {
    if team_size == 0 {
        return Partition {
            team_slices: Vec::new(),
            substitutes: shuffled,
        };
    }
    let total_teams = shuffled.len() / team_size;
    let mut players = shuffled;
    let substitutes = players.split_off(total_teams * team_size);

    let mut team_slices = Vec::with_capacity(total_teams);
    let mut rest = players.into_iter();
    for _ in 0..total_teams {
        team_slices.push(rest.by_ref().take(team_size).collect());
    }

    Partition {
        team_slices,
        substitutes,
    }
}
