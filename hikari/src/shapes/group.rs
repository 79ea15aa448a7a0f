use std::sync::Arc;

use super::Shape;
use crate::{
    hikari_trace,
    intersection::Intersection,
    math::{BoundingBox, Ray, Transform},
};

/// An ordered collection of child [Shape]s sharing the group's transform.
///
/// The local-space bounds of the children are cached and kept up to date as
/// children are added or the group is subdivided.
#[derive(Clone, Debug, Default)]
pub struct Group {
    children: Vec<Shape>,
    bounds: BoundingBox,
}

impl Group {
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub(super) fn children_mut(&mut self) -> &mut [Shape] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the union of the children's bounds in the group's local space.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub(super) fn add_child(&mut self, mut child: Shape, frame: &Arc<Transform>) {
        child.set_parent_frame(frame.clone());
        self.bounds = self.bounds.union_b(&child.parent_space_bounds());
        self.children.push(child);
    }

    pub(super) fn intersect_into<'a>(&'a self, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        if !self.bounds.intersect(ray) {
            return;
        }
        for child in &self.children {
            child.intersect_into(ray, out);
        }
    }

    pub(super) fn divide(&mut self, threshold: usize, frame: &Arc<Transform>) {
        if self.children.len() > threshold {
            let (left, right) = self.partition_children();
            hikari_trace!(
                "Divide: {} left, {} right, {} straddling",
                left.len(),
                right.len(),
                self.children.len()
            );
            for partition in [left, right] {
                if !partition.is_empty() {
                    self.add_child(Shape::group_of(partition), frame);
                }
            }
        }

        for child in &mut self.children {
            child.divide(threshold);
        }
        self.refresh_bounds();
    }

    /// Moves the children that fit entirely in either half of the bounds out of this group.
    fn partition_children(&mut self) -> (Vec<Shape>, Vec<Shape>) {
        let (left_bounds, right_bounds) = self.bounds.split();
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut remaining = Vec::new();

        for child in self.children.drain(..) {
            let child_bounds = child.parent_space_bounds();
            if left_bounds.contains_box(&child_bounds) {
                left.push(child);
            } else if right_bounds.contains_box(&child_bounds) {
                right.push(child);
            } else {
                remaining.push(child);
            }
        }
        self.children = remaining;

        (left, right)
    }

    fn refresh_bounds(&mut self) {
        self.bounds = self
            .children
            .iter()
            .fold(BoundingBox::default(), |bb, c| bb.union_b(&c.parent_space_bounds()));
    }
}
