//! Constructive solid geometry over ray-parameter intervals.
//!
//! Each child reports where the ray crosses its boundary; consecutive
//! crossings pair up into enter/exit spans. The composite combines the two
//! span lists and keeps, for every surviving boundary, the leaf primitive
//! that owns it, so shading is delegated to that leaf.

use lux_math::Ray;

use crate::shape::{Crossing, HitRecord, Shape};

/// Boundaries of a fusion closer than this (in ray parameter) are merged.
pub const CSG_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOperation {
    /// Points inside either child
    Union,
    /// Points inside both children
    Intersection,
    /// Points inside the left child but not the right one
    Difference,
    /// Union that also welds boundaries closer than `CSG_EPSILON`, so that
    /// coincident faces do not leave slivers behind
    Fusion,
}

/// A solid span `[enter, exit]` along a ray.
#[derive(Debug, Clone, Copy)]
struct Span<'a> {
    enter: Crossing<'a>,
    exit: Crossing<'a>,
}

/// Two shapes combined by a boolean operation.
#[derive(Debug)]
pub struct Csg {
    operation: CsgOperation,
    left: Box<dyn Shape>,
    right: Box<dyn Shape>,
}

impl Csg {
    pub fn new(operation: CsgOperation, left: Box<dyn Shape>, right: Box<dyn Shape>) -> Self {
        Self {
            operation,
            left,
            right,
        }
    }

    pub fn union(left: impl Shape + 'static, right: impl Shape + 'static) -> Self {
        Self::new(CsgOperation::Union, Box::new(left), Box::new(right))
    }

    pub fn intersection(left: impl Shape + 'static, right: impl Shape + 'static) -> Self {
        Self::new(CsgOperation::Intersection, Box::new(left), Box::new(right))
    }

    pub fn difference(left: impl Shape + 'static, right: impl Shape + 'static) -> Self {
        Self::new(CsgOperation::Difference, Box::new(left), Box::new(right))
    }

    pub fn fusion(left: impl Shape + 'static, right: impl Shape + 'static) -> Self {
        Self::new(CsgOperation::Fusion, Box::new(left), Box::new(right))
    }

    pub fn operation(&self) -> CsgOperation {
        self.operation
    }

    fn combined_spans(&self, ray: &Ray) -> Vec<Span<'_>> {
        let left = pair_spans(self.left.crossings(ray));
        let right = pair_spans(self.right.crossings(ray));

        match self.operation {
            CsgOperation::Union => union(left, right, 0.0),
            CsgOperation::Fusion => union(left, right, CSG_EPSILON),
            CsgOperation::Intersection => intersection(&left, &right),
            CsgOperation::Difference => difference(&left, &right),
        }
    }

    fn first_visible<'a>(&'a self, ray: &Ray) -> Option<Crossing<'a>> {
        self.crossings(ray).into_iter().find(|c| ray.accepts(c.t))
    }
}

impl Shape for Csg {
    fn crossings(&self, ray: &Ray) -> Vec<Crossing<'_>> {
        self.combined_spans(ray)
            .into_iter()
            .flat_map(|span| [span.enter, span.exit])
            .collect()
    }

    fn nearest_t(&self, ray: &Ray) -> Option<f32> {
        self.first_visible(ray).map(|c| c.t)
    }

    fn hit_at(&self, ray: &Ray, t: f32) -> HitRecord<'_> {
        let owner = self
            .crossings(ray)
            .into_iter()
            .min_by(|a, b| (a.t - t).abs().total_cmp(&(b.t - t).abs()))
            .map(|c| c.surface)
            .unwrap_or(self.left.as_ref());
        owner.hit_at(ray, t)
    }

    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let crossing = self.first_visible(ray)?;
        Some(crossing.surface.hit_at(ray, crossing.t))
    }
}

/// Pair sorted crossings into enter/exit spans.
///
/// Solids always produce an even number of crossings; an odd count means a
/// child is not closed along this ray, and its last crossing is ignored.
fn pair_spans(crossings: Vec<Crossing<'_>>) -> Vec<Span<'_>> {
    if crossings.len() % 2 != 0 {
        log::debug!(
            "CSG child reported {} crossings, dropping the unmatched last one",
            crossings.len()
        );
    }
    crossings
        .chunks_exact(2)
        .map(|pair| Span {
            enter: pair[0],
            exit: pair[1],
        })
        .collect()
}

/// Sorted union; spans whose gap is at most `tolerance` are merged.
fn union<'a>(left: Vec<Span<'a>>, right: Vec<Span<'a>>, tolerance: f32) -> Vec<Span<'a>> {
    let mut spans = left;
    spans.extend(right);
    spans.sort_by(|a, b| a.enter.t.total_cmp(&b.enter.t));

    let mut merged: Vec<Span<'a>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(current) if span.enter.t <= current.exit.t + tolerance => {
                if span.exit.t > current.exit.t {
                    current.exit = span.exit;
                }
            }
            _ => merged.push(span),
        }
    }
    merged
}

fn intersection<'a>(left: &[Span<'a>], right: &[Span<'a>]) -> Vec<Span<'a>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let (a, b) = (left[i], right[j]);
        let enter = if a.enter.t >= b.enter.t { a.enter } else { b.enter };
        let exit = if a.exit.t <= b.exit.t { a.exit } else { b.exit };
        if enter.t < exit.t {
            result.push(Span { enter, exit });
        }

        if a.exit.t <= b.exit.t {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

fn difference<'a>(left: &[Span<'a>], right: &[Span<'a>]) -> Vec<Span<'a>> {
    let mut result = Vec::new();

    for span in left {
        let mut start = span.enter;
        for cut in right {
            if cut.exit.t <= start.t {
                continue;
            }
            if cut.enter.t >= span.exit.t {
                break;
            }
            if cut.enter.t > start.t {
                result.push(Span {
                    enter: start,
                    exit: cut.enter,
                });
            }
            start = cut.exit;
        }
        if start.t < span.exit.t {
            result.push(Span {
                enter: start,
                exit: span.exit,
            });
        }
    }
    result
}
