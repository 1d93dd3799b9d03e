//! Voronoi diagrams via Bowyer-Watson Delaunay triangulation.
//!
//! Two sites are Voronoi neighbors exactly when they share a Delaunay edge
//! whose dual Voronoi edge has positive length. The dual edge of an interior
//! Delaunay edge joins the circumcenters of its two triangles; a hull edge's
//! dual is a ray pointing away from the hull. Dual edges are clipped to the
//! extent with Liang-Barsky, so neighbors whose shared boundary lies outside
//! the rectangle are not neighbors.

use std::collections::HashMap;

use super::diagram::{Extent, VoronoiDiagram};
use super::{TessellationError, Tessellator};

/// Size of the enclosing super triangle relative to the site bounding box.
const SUPER_TRIANGLE_SCALE: f64 = 100.0;

/// Relative slack on the in-circumcircle test (cocircular sites count as inside).
const IN_CIRCLE_TOLERANCE: f64 = 1e-10;

/// Dual edges shorter than this fraction of the extent diagonal are dropped.
const MIN_EDGE_FRACTION: f64 = 1e-9;

/// Default [`Tessellator`]: Bowyer-Watson triangulation, dual edges clipped
/// to the extent.
///
/// # Example
///
/// ```
/// use class_palette::voronoi::{DelaunayTessellator, Extent, Tessellator};
///
/// let sites = [[10.0, 10.0], [20.0, 10.0], [15.0, 20.0]];
/// let diagram = DelaunayTessellator.tessellate(&sites, Extent::canvas(30.0, 30.0)).unwrap();
///
/// let mut neighbors: Vec<usize> = diagram.neighbors(0).collect();
/// neighbors.sort();
/// assert_eq!(neighbors, vec![1, 2]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayTessellator;

#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
    // None for degenerate (collinear) triangles
    circle: Option<([f64; 2], f64)>,
}

impl Triangle {
    fn new(v: [usize; 3], points: &[[f64; 2]]) -> Self {
        Self {
            v,
            circle: circumcircle(points[v[0]], points[v[1]], points[v[2]]),
        }
    }

    #[inline]
    fn encloses(&self, p: [f64; 2]) -> bool {
        match self.circle {
            Some((center, radius2)) => {
                let dx = p[0] - center[0];
                let dy = p[1] - center[1];
                dx * dx + dy * dy <= radius2 * (1.0 + IN_CIRCLE_TOLERANCE)
            }
            // Degenerate triangles are always replaced
            None => true,
        }
    }

    #[inline]
    fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.v[0], self.v[1]),
            (self.v[1], self.v[2]),
            (self.v[2], self.v[0]),
        ]
    }
}

/// Circumcenter and squared circumradius, or `None` for collinear points.
fn circumcircle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<([f64; 2], f64)> {
    let (bx, by) = (b[0] - a[0], b[1] - a[1]);
    let (cx, cy) = (c[0] - a[0], c[1] - a[1]);
    let d = 2.0 * (bx * cy - by * cx);
    if d == 0.0 || !d.is_finite() {
        return None;
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    if !ux.is_finite() || !uy.is_finite() {
        return None;
    }
    Some(([a[0] + ux, a[1] + uy], ux * ux + uy * uy))
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Bowyer-Watson triangulation of `points`. Returned triangles index into
/// `points`; triangles touching the super triangle are discarded.
fn triangulate(points: &[[f64; 2]]) -> Vec<Triangle> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p[0]);
        min_y = min_y.min(p[1]);
        max_x = max_x.max(p[0]);
        max_y = max_y.max(p[1]);
    }
    let span = (max_x - min_x).max(max_y - min_y).max(1.0) * SUPER_TRIANGLE_SCALE;
    let (mid_x, mid_y) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    let mut vertices = points.to_vec();
    vertices.push([mid_x - 2.0 * span, mid_y - span]);
    vertices.push([mid_x, mid_y + 2.0 * span]);
    vertices.push([mid_x + 2.0 * span, mid_y - span]);

    let mut triangles = vec![Triangle::new([n, n + 1, n + 2], &vertices)];
    let mut boundary: Vec<(usize, usize)> = Vec::new();
    let mut edge_uses: HashMap<(usize, usize), u32> = HashMap::new();

    for (i, &p) in points.iter().enumerate() {
        boundary.clear();
        edge_uses.clear();

        triangles.retain(|t| {
            if t.encloses(p) {
                for (a, b) in t.edges() {
                    *edge_uses.entry(edge_key(a, b)).or_insert(0) += 1;
                    boundary.push((a, b));
                }
                false
            } else {
                true
            }
        });

        // The cavity boundary consists of edges used by exactly one removed triangle
        for &(a, b) in &boundary {
            if edge_uses[&edge_key(a, b)] == 1 {
                triangles.push(Triangle::new([a, b, i], &vertices));
            }
        }
    }

    triangles.retain(|t| t.circle.is_some() && t.v.iter().all(|&v| v < n));
    triangles
}

/// Liang-Barsky clip of `origin + t * dir`, `t` in `[t0, t1]`.
///
/// Returns the clipped parameter range and whether either end was cut.
fn clip(
    origin: [f64; 2],
    dir: [f64; 2],
    t0: f64,
    t1: f64,
    extent: &Extent,
) -> Option<(f64, f64, bool)> {
    let (mut lo, mut hi) = (t0, t1);
    let checks = [
        (-dir[0], origin[0] - extent.x0),
        (dir[0], extent.x1 - origin[0]),
        (-dir[1], origin[1] - extent.y0),
        (dir[1], extent.y1 - origin[1]),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > hi {
                    return None;
                }
                lo = lo.max(r);
            } else {
                if r < lo {
                    return None;
                }
                hi = hi.min(r);
            }
        }
    }
    if lo > hi {
        return None;
    }
    Some((lo, hi, lo > t0 || hi < t1))
}

impl DelaunayTessellator {
    /// Link `a` and `b` if the clipped dual edge has positive length.
    #[allow(clippy::too_many_arguments)]
    fn link(
        diagram: &mut VoronoiDiagram,
        on_border: &mut [bool],
        a: usize,
        b: usize,
        origin: [f64; 2],
        dir: [f64; 2],
        t0: f64,
        t1: f64,
        extent: &Extent,
    ) {
        let dir_len = (dir[0] * dir[0] + dir[1] * dir[1]).sqrt();
        let diagonal = (extent.width().powi(2) + extent.height().powi(2)).sqrt();
        if dir_len == 0.0 {
            return;
        }
        if let Some((lo, hi, clipped)) = clip(origin, dir, t0, t1, extent) {
            if (hi - lo) * dir_len > diagonal * MIN_EDGE_FRACTION {
                diagram.add_edge(a, b);
                if clipped {
                    on_border[a] = true;
                    on_border[b] = true;
                }
            }
        }
    }

    /// Neighbors along a line, for inputs where every site is collinear.
    fn link_collinear(
        diagram: &mut VoronoiDiagram,
        on_border: &mut [bool],
        unique: &[usize],
        sites: &[[f64; 2]],
        extent: &Extent,
    ) {
        let first = sites[unique[0]];
        let far = unique
            .iter()
            .map(|&i| sites[i])
            .max_by(|p, q| {
                let dp = (p[0] - first[0]).powi(2) + (p[1] - first[1]).powi(2);
                let dq = (q[0] - first[0]).powi(2) + (q[1] - first[1]).powi(2);
                dp.total_cmp(&dq)
            })
            .unwrap_or(first);
        let axis = [far[0] - first[0], far[1] - first[1]];

        let mut order = unique.to_vec();
        order.sort_by(|&i, &j| {
            let pi = (sites[i][0] - first[0]) * axis[0] + (sites[i][1] - first[1]) * axis[1];
            let pj = (sites[j][0] - first[0]) * axis[0] + (sites[j][1] - first[1]) * axis[1];
            pi.total_cmp(&pj)
        });

        for pair in order.windows(2) {
            let (a, b) = (sites[pair[0]], sites[pair[1]]);
            let mid = [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0];
            let perpendicular = [-(b[1] - a[1]), b[0] - a[0]];
            Self::link(
                diagram,
                on_border,
                pair[0],
                pair[1],
                mid,
                perpendicular,
                f64::NEG_INFINITY,
                f64::INFINITY,
                extent,
            );
        }
    }
}

impl Tessellator for DelaunayTessellator {
    fn tessellate(
        &self,
        sites: &[[f64; 2]],
        extent: Extent,
    ) -> Result<VoronoiDiagram, TessellationError> {
        if !extent.is_valid() {
            return Err(TessellationError::InvalidExtent);
        }
        if let Some(index) = sites
            .iter()
            .position(|p| !p[0].is_finite() || !p[1].is_finite())
        {
            return Err(TessellationError::NonFiniteSite { index });
        }

        let mut diagram = VoronoiDiagram::new(sites.to_vec());

        // Coincident sites: the first one owns the cell
        let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(sites.len());
        let mut unique: Vec<usize> = Vec::with_capacity(sites.len());
        for (i, p) in sites.iter().enumerate() {
            // +0.0 folds -0.0 into 0.0 so both hash alike
            let key = ((p[0] + 0.0).to_bits(), (p[1] + 0.0).to_bits());
            if seen.contains_key(&key) {
                diagram.remove_cell(i);
            } else {
                seen.insert(key, i);
                unique.push(i);
            }
        }

        let mut on_border = vec![false; sites.len()];
        let points: Vec<[f64; 2]> = unique.iter().map(|&i| sites[i]).collect();
        let triangles = triangulate(&points);

        if triangles.is_empty() {
            if unique.len() >= 2 {
                Self::link_collinear(&mut diagram, &mut on_border, &unique, sites, &extent);
            }
        } else {
            let mut edge_triangles: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
            for (t, triangle) in triangles.iter().enumerate() {
                for (a, b) in triangle.edges() {
                    edge_triangles.entry(edge_key(a, b)).or_default().push(t);
                }
            }
            let mut keys: Vec<(usize, usize)> = edge_triangles.keys().copied().collect();
            keys.sort_unstable();

            for (a, b) in keys {
                let owners = &edge_triangles[&(a, b)];
                let (site_a, site_b) = (unique[a], unique[b]);
                match owners.as_slice() {
                    [t1, t2] => {
                        let (Some((c1, _)), Some((c2, _))) =
                            (triangles[*t1].circle, triangles[*t2].circle)
                        else {
                            continue;
                        };
                        let dir = [c2[0] - c1[0], c2[1] - c1[1]];
                        Self::link(
                            &mut diagram,
                            &mut on_border,
                            site_a,
                            site_b,
                            c1,
                            dir,
                            0.0,
                            1.0,
                            &extent,
                        );
                    }
                    [t] => {
                        let triangle = &triangles[*t];
                        let Some((center, _)) = triangle.circle else {
                            continue;
                        };
                        let Some(&k) = triangle.v.iter().find(|&&v| v != a && v != b) else {
                            continue;
                        };
                        let (pa, pb, pk) = (points[a], points[b], points[k]);
                        let mut normal = [-(pb[1] - pa[1]), pb[0] - pa[0]];
                        if normal[0] * (pk[0] - pa[0]) + normal[1] * (pk[1] - pa[1]) > 0.0 {
                            normal = [-normal[0], -normal[1]];
                        }
                        Self::link(
                            &mut diagram,
                            &mut on_border,
                            site_a,
                            site_b,
                            center,
                            normal,
                            0.0,
                            f64::INFINITY,
                            &extent,
                        );
                    }
                    _ => {}
                }
            }
        }

        if unique.len() == 1 {
            on_border[unique[0]] = true;
        }
        for (site, &border) in on_border.iter().enumerate() {
            if border {
                diagram.add_boundary_edge(site);
            }
        }

        Ok(diagram)
    }
}
