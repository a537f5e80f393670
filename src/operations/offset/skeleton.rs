use tracing::{trace, warn};

use crate::geometry::Ring;
use crate::math::kernel::{KernelKind, Orientation};
use crate::math::polygon_2d::remove_collinear;
use crate::math::{to_3d, Point2, Point3, Vector2};

/// Parallel or anti-parallel wavefront lines.
const PARALLEL_EPS: f64 = 1e-12;

/// A supporting line of one wavefront edge.
///
/// At time `t` the line is `n . x = c + t`; `n` is the unit normal towards
/// the shrinking region.
#[derive(Debug, Clone, Copy)]
struct WaveLine {
    n: Vector2,
    c: f64,
}

impl WaveLine {
    fn through(a: &Point2, b: &Point2) -> Self {
        let d = b - a;
        let len = d.norm();
        let n = if len > 0.0 {
            Vector2::new(-d.y, d.x) / len
        } else {
            Vector2::zeros()
        };
        Self {
            n,
            c: n.dot(&a.coords),
        }
    }

    /// Unit direction of the edge, with the region on its left.
    fn dir(&self) -> Vector2 {
        Vector2::new(self.n.y, -self.n.x)
    }
}

#[derive(Debug, Clone)]
struct WaveVertex {
    pos: Point2,
    vel: Vector2,
    /// Where this vertex started moving; its skeleton arc begins here.
    origin: Point2,
    line_in: usize,
    line_out: usize,
    prev: usize,
    next: usize,
    active: bool,
}

#[derive(Debug, Clone, Copy)]
enum Event {
    /// The edge starting at `u` shrinks to zero length.
    Edge { u: usize },
    /// Reflex vertex `v` hits the edge starting at `a`.
    Split { v: usize, a: usize },
}

/// Wavefront propagation of a straight skeleton.
///
/// Every edge moves along its normal at unit speed and every vertex along
/// the bisector of its two lines. Edge events merge the two vertices of a
/// vanishing edge; split events cut a loop in two where a reflex vertex runs
/// into an opposite edge. Loops with fewer than three vertices vanish.
#[derive(Debug, Clone)]
pub(crate) struct Wavefront {
    lines: Vec<WaveLine>,
    vertices: Vec<WaveVertex>,
    now: f64,
    eps: f64,
    arcs: Vec<(Point2, Point2)>,
}

impl Wavefront {
    /// Starts a wavefront on `ring`. The region to shrink lies left of each
    /// edge, so a counter-clockwise ring shrinks its interior and a
    /// clockwise ring grows the polygon outwards.
    pub(crate) fn new(ring: &[Point2]) -> Option<Self> {
        let n = ring.len();
        if n < 3 {
            return None;
        }

        let lines: Vec<WaveLine> = (0..n)
            .map(|i| WaveLine::through(&ring[i], &ring[(i + 1) % n]))
            .collect();

        let extent = ring
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs()])
            .fold(1.0_f64, f64::max);

        let mut front = Self {
            lines,
            vertices: Vec::with_capacity(n * 2),
            now: 0.0,
            eps: 1e-9 * extent,
            arcs: Vec::new(),
        };

        for (i, p) in ring.iter().enumerate() {
            let line_in = (i + n - 1) % n;
            let vel = front.velocity(line_in, i);
            front.vertices.push(WaveVertex {
                pos: *p,
                vel,
                origin: *p,
                line_in,
                line_out: i,
                prev: (i + n - 1) % n,
                next: (i + 1) % n,
                active: true,
            });
        }
        Some(front)
    }

    /// Vertex velocity keeping it on both moving lines.
    fn velocity(&self, line_in: usize, line_out: usize) -> Vector2 {
        let n1 = self.lines[line_in].n;
        let n2 = self.lines[line_out].n;
        let det = n1.perp(&n2);
        if det.abs() < PARALLEL_EPS {
            return if n1.dot(&n2) > 0.0 { n1 } else { Vector2::zeros() };
        }
        Vector2::new(n2.y - n1.y, n1.x - n2.x) / det
    }

    fn is_reflex(&self, v: usize) -> bool {
        let vertex = &self.vertices[v];
        self.lines[vertex.line_in].n.perp(&self.lines[vertex.line_out].n) < -PARALLEL_EPS
    }

    /// Runs the simulation up to time `until` (may be infinite).
    ///
    /// Returns `false` if the event limit was reached first.
    pub(crate) fn run_until(&mut self, until: f64) -> bool {
        let limit = self.vertices.len() * 10 + 100;
        for _ in 0..limit {
            match self.next_event() {
                Some((t, event)) if t <= until => {
                    self.advance(t.max(self.now));
                    trace!(time = self.now, ?event, "wavefront event");
                    match event {
                        Event::Edge { u } => self.handle_edge(u),
                        Event::Split { v, a } => self.handle_split(v, a),
                    }
                }
                _ => {
                    if until.is_finite() {
                        self.advance(until);
                    }
                    return true;
                }
            }
        }
        warn!(limit, "wavefront event limit reached");
        if until.is_finite() {
            self.advance(until);
        }
        false
    }

    /// Earliest pending event. Edge events win ties against split events.
    fn next_event(&self) -> Option<(f64, Event)> {
        let mut edge: Option<(f64, Event)> = None;
        let mut split: Option<(f64, Event)> = None;

        for (u, vertex) in self.vertices.iter().enumerate() {
            if !vertex.active {
                continue;
            }
            if let Some(t) = self.edge_event_time(u) {
                if edge.is_none_or(|(best, _)| t < best) {
                    edge = Some((t, Event::Edge { u }));
                }
            }
            if !self.is_reflex(u) {
                continue;
            }
            let mut a = vertex.next;
            while a != vertex.prev {
                if let Some(t) = self.split_event_time(u, a) {
                    if split.is_none_or(|(best, _)| t < best) {
                        split = Some((t, Event::Split { v: u, a }));
                    }
                }
                a = self.vertices[a].next;
            }
        }

        match (edge, split) {
            (Some(e), Some(s)) => Some(if s.0 < e.0 - self.eps { s } else { e }),
            (e, s) => e.or(s),
        }
    }

    fn edge_event_time(&self, u: usize) -> Option<f64> {
        let vu = &self.vertices[u];
        let vw = &self.vertices[vu.next];
        let d = self.lines[vu.line_out].dir();
        let len = d.dot(&(vw.pos - vu.pos));
        if len <= self.eps {
            return Some(self.now);
        }
        let rate = d.dot(&(vw.vel - vu.vel));
        if rate >= -PARALLEL_EPS {
            return None;
        }
        Some(self.now - len / rate)
    }

    fn split_event_time(&self, v: usize, a: usize) -> Option<f64> {
        let vertex = &self.vertices[v];
        let start = &self.vertices[a];
        let end = &self.vertices[start.next];
        if a == v || start.next == v {
            return None;
        }

        let line = &self.lines[start.line_out];
        let dist = line.n.dot(&vertex.pos.coords) - (line.c + self.now);
        let approach = 1.0 - line.n.dot(&vertex.vel);
        if dist < -self.eps || approach <= PARALLEL_EPS {
            return None;
        }

        let tau = dist.max(0.0) / approach;
        let hit = vertex.pos + vertex.vel * tau;
        let pa = start.pos + start.vel * tau;
        let pb = end.pos + end.vel * tau;
        let d = line.dir();
        if d.dot(&(pb - pa)) < 0.0
            || d.dot(&(hit - pa)) < -self.eps
            || d.dot(&(pb - hit)) < -self.eps
        {
            return None;
        }
        Some(self.now + tau)
    }

    fn advance(&mut self, t: f64) {
        let dt = t - self.now;
        for vertex in self.vertices.iter_mut().filter(|v| v.active) {
            vertex.pos += vertex.vel * dt;
        }
        self.now = t;
    }

    fn retire(&mut self, v: usize) {
        let vertex = &mut self.vertices[v];
        vertex.active = false;
        if (vertex.pos - vertex.origin).norm() > self.eps {
            self.arcs.push((vertex.origin, vertex.pos));
        }
    }

    fn spawn(
        &mut self,
        pos: Point2,
        line_in: usize,
        line_out: usize,
        prev: usize,
        next: usize,
    ) -> usize {
        let vel = self.velocity(line_in, line_out);
        self.vertices.push(WaveVertex {
            pos,
            vel,
            origin: pos,
            line_in,
            line_out,
            prev,
            next,
            active: true,
        });
        self.vertices.len() - 1
    }

    fn handle_edge(&mut self, u: usize) {
        let w = self.vertices[u].next;
        let prev = self.vertices[u].prev;
        let next = self.vertices[w].next;
        let pos = Point2::from((self.vertices[u].pos.coords + self.vertices[w].pos.coords) * 0.5);
        self.vertices[u].pos = pos;
        self.vertices[w].pos = pos;
        let line_in = self.vertices[u].line_in;
        let line_out = self.vertices[w].line_out;
        self.retire(u);
        self.retire(w);

        if prev == w {
            return;
        }
        let x = self.spawn(pos, line_in, line_out, prev, next);
        self.vertices[prev].next = x;
        self.vertices[next].prev = x;
        self.collapse_if_small(x);
    }

    fn handle_split(&mut self, v: usize, a: usize) {
        let b = self.vertices[a].next;
        let hit = self.vertices[v].pos;
        let (v_prev, v_next) = (self.vertices[v].prev, self.vertices[v].next);
        let (v_in, v_out) = (self.vertices[v].line_in, self.vertices[v].line_out);
        let edge_line = self.vertices[a].line_out;
        self.retire(v);

        let x1 = self.spawn(hit, v_in, edge_line, v_prev, b);
        self.vertices[v_prev].next = x1;
        self.vertices[b].prev = x1;

        let x2 = self.spawn(hit, edge_line, v_out, a, v_next);
        self.vertices[a].next = x2;
        self.vertices[v_next].prev = x2;

        self.collapse_if_small(x1);
        self.collapse_if_small(x2);
    }

    /// Retires the loop through `start` if it has fewer than three vertices.
    fn collapse_if_small(&mut self, start: usize) {
        if !self.vertices[start].active {
            return;
        }
        let second = self.vertices[start].next;
        let third = self.vertices[second].next;
        if second != start && third != start {
            return;
        }
        if second != start {
            let (p, q) = (self.vertices[start].pos, self.vertices[second].pos);
            if (q - p).norm() > self.eps {
                self.arcs.push((p, q));
            }
            self.retire(second);
        }
        self.retire(start);
    }

    /// Current loops, each in wavefront order.
    pub(crate) fn loops(&self) -> Vec<Vec<Point2>> {
        let mut visited = vec![false; self.vertices.len()];
        let mut loops = Vec::new();
        for start in 0..self.vertices.len() {
            if !self.vertices[start].active || visited[start] {
                continue;
            }
            let mut ring = Vec::new();
            let mut v = start;
            while !visited[v] {
                visited[v] = true;
                ring.push(self.vertices[v].pos);
                v = self.vertices[v].next;
            }
            loops.push(ring);
        }
        loops
    }

    /// Skeleton arcs traced so far.
    pub(crate) fn arcs(&self) -> &[(Point2, Point2)] {
        &self.arcs
    }
}

/// Computes the interior straight skeleton of a simple polygon.
///
/// The result lists the arcs traced by the wavefront vertices, each as its
/// start and end point (z = 0).
pub struct StraightSkeleton {
    points: Vec<Point3>,
    kernel: KernelKind,
}

impl StraightSkeleton {
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            kernel: KernelKind::Inexact,
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Executes the construction. A ring that is not simple yields no arcs.
    #[must_use]
    pub fn execute(&self) -> Vec<[Point3; 2]> {
        let ring = Ring::from_points(&self.points);
        if !ring.is_simple(self.kernel) {
            warn!("polygon is not simple, cannot build straight skeleton");
            return Vec::new();
        }
        let ring = ring.oriented(Orientation::CounterClockwise, self.kernel);
        let points = remove_collinear(ring.points().to_vec(), self.kernel);

        let Some(mut front) = Wavefront::new(&points) else {
            return Vec::new();
        };
        front.run_until(f64::INFINITY);
        front.arcs().iter().map(|(a, b)| [to_3d(a), to_3d(b)]).collect()
    }
}
