use std::collections::HashMap;
use std::f64::consts::PI;

use crate::math::Point2;

/// Traces closed cycles through a set of directed edges `(from, to)`.
///
/// At every vertex the walk continues with the outgoing edge reached first
/// when turning clockwise from the reversed incoming direction. On a full
/// half-edge graph (every edge present in both directions) this visits each
/// face with the face on its left: bounded faces counter-clockwise, the
/// outer boundary of each connected component clockwise.
///
/// Returns each cycle as a list of edge indices. Edges that cannot be closed
/// into a cycle are skipped.
#[must_use]
pub fn trace_cycles(points: &[Point2], edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
    for (idx, &(from, _)) in edges.iter().enumerate() {
        outgoing[from].push(idx);
    }

    let mut used = vec![false; edges.len()];
    let mut cycles = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut current = start;
        let closed = loop {
            used[current] = true;
            cycle.push(current);
            let Some(next) = pick_next_edge(current, edges, &outgoing, points) else {
                break false;
            };
            if next == start {
                break true;
            }
            if used[next] {
                break false;
            }
            current = next;
        };
        if closed {
            cycles.push(cycle);
        }
    }

    cycles
}

/// Splits a traced cycle at every vertex it passes more than once.
///
/// A cycle that pinches itself at a vertex comes back as one simple cycle
/// per lobe. Each returned cycle is closed and lists edge indices in walk
/// order.
#[must_use]
pub fn split_at_repeated_vertices(cycle: &[usize], edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut pieces = Vec::new();
    let mut path: Vec<usize> = Vec::with_capacity(cycle.len());
    let mut position: HashMap<usize, usize> = HashMap::new();

    for &edge in cycle {
        let vertex = edges[edge].0;
        if let Some(&k) = position.get(&vertex) {
            let lobe = path.split_off(k);
            for &e in &lobe {
                position.remove(&edges[e].0);
            }
            pieces.push(lobe);
        }
        position.insert(vertex, path.len());
        path.push(edge);
    }
    if !path.is_empty() {
        pieces.push(path);
    }
    pieces
}

/// Picks the outgoing edge at the head of `incoming` with the smallest
/// clockwise turn from the reversed incoming direction. Going straight back
/// is the last resort.
fn pick_next_edge(
    incoming: usize,
    edges: &[(usize, usize)],
    outgoing: &[Vec<usize>],
    points: &[Point2],
) -> Option<usize> {
    let (from, node) = edges[incoming];
    let reverse_angle = direction_angle(&points[node], &points[from]);
    let mut best: Option<(usize, f64)> = None;

    for &candidate in &outgoing[node] {
        let target = edges[candidate].1;
        let heading = direction_angle(&points[node], &points[target]);
        let mut delta = normalize_angle(reverse_angle - heading);
        if delta == 0.0 {
            delta = 2.0 * PI;
        }
        if best.is_none_or(|(_, bd)| delta < bd) {
            best = Some((candidate, delta));
        }
    }

    best.map(|(idx, _)| idx)
}

fn direction_angle(from: &Point2, to: &Point2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Normalizes an angle to [0, 2pi).
fn normalize_angle(a: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let r = a % two_pi;
    if r < 0.0 {
        r + two_pi
    } else {
        r
    }
}
