// engine.rs - One generation of the automaton
//
// Every read comes from `current` and every write goes to `next`, so the
// order in which cells are visited never changes the result.

use crate::display::DisplaySink;
use crate::grid::Grid;
use crate::rules::RuleTable;

/// Computes `next` from `current`, pushes each new cell colour to `sink`
/// and returns the activity count: cells whose new state is alive.
pub fn transition<const W: usize, const H: usize, S>(
    rules: &RuleTable,
    current: &Grid<W, H>,
    next: &mut Grid<W, H>,
    sink: &mut S,
) -> usize
where
    S: DisplaySink + ?Sized,
{
    let mut activity = 0;
    for y in 0..H {
        activity += process_row(rules, current, next, sink, y);
    }
    activity
}

fn process_row<const W: usize, const H: usize, S>(
    rules: &RuleTable,
    current: &Grid<W, H>,
    next: &mut Grid<W, H>,
    sink: &mut S,
    y: usize,
) -> usize
where
    S: DisplaySink + ?Sized,
{
    let mut activity = 0;
    for x in 0..W {
        let neighbors = current.alive_neighbors(rules, x, y);
        let state = rules.transition(current.get(x, y), neighbors);
        let rule = rules.lookup(state);

        activity += rule.alive as usize;
        next.set(x, y, state);
        sink.set_pixel(x, y, rule.color);
    }
    activity
}

/// Same as [`transition`] without a display, returning a fresh grid.
pub fn next_generation<const W: usize, const H: usize>(
    rules: &RuleTable,
    current: &Grid<W, H>,
) -> (Grid<W, H>, usize) {
    let mut next = Grid::new();
    let activity = transition(rules, current, &mut next, &mut crate::display::NullSink);
    (next, activity)
}
