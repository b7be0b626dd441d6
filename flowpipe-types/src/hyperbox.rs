use crate::interval::TimeInterval;
use crate::linear::Matrix;
use crate::set::{ConvexSet, SupportSet};
use serde::{Deserialize, Serialize};

/// An n-dimensional axis-aligned box.
///
/// `Hyperbox` is the reference [`ConvexSet`] implementation: the box
/// `[min_0, max_0] × … × [min_{n-1}, max_{n-1}]`. Reachability producers
/// typically work with richer representations behind the same traits; this
/// one exists so the crate's own tests, benches, and documentation have a
/// concrete set to hold.
///
/// # Examples
///
/// ```
/// use flowpipe_types::{Hyperbox, SupportSet};
///
/// let b = Hyperbox::new(vec![0.0, -1.0], vec![2.0, 1.0]);
/// assert_eq!(b.dimension(), 2);
/// assert_eq!(b.support_value(&[1.0, 0.0]), 2.0);
/// assert_eq!(b.support_vector(&[0.0, -1.0]), vec![0.0, -1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperbox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl Hyperbox {
    /// Create a box from componentwise minimum and maximum coordinates.
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Self {
        assert_eq!(
            min.len(),
            max.len(),
            "Box bounds must have matching dimensions"
        );
        assert!(
            min.iter().zip(&max).all(|(lo, hi)| lo <= hi),
            "Box minimum must not exceed maximum in any coordinate"
        );
        Self { min, max }
    }

    /// The box centered at `center` with half-width `radius` in every axis.
    pub fn from_center_radius(center: &[f64], radius: f64) -> Self {
        assert!(radius >= 0.0, "Box radius must be non-negative");
        Self {
            min: center.iter().map(|c| c - radius).collect(),
            max: center.iter().map(|c| c + radius).collect(),
        }
    }

    /// Componentwise minimum coordinates.
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Componentwise maximum coordinates.
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec<f64> {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(lo, hi)| (lo + hi) / 2.0)
            .collect()
    }

    /// Check whether `point` lies inside the box (faces included).
    pub fn contains_point(&self, point: &[f64]) -> bool {
        point.len() == self.min.len()
            && point
                .iter()
                .enumerate()
                .all(|(i, &x)| x >= self.min[i] && x <= self.max[i])
    }

    /// Check whether this box and `other` share at least one point.
    pub fn intersects(&self, other: &Hyperbox) -> bool {
        self.min.len() == other.min.len()
            && self
                .min
                .iter()
                .enumerate()
                .all(|(i, &lo)| !(self.max[i] < other.min[i] || other.max[i] < lo))
    }

    /// Grow the box by `amount` in every direction.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.min.iter().map(|lo| lo - amount).collect(),
            self.max.iter().map(|hi| hi + amount).collect(),
        )
    }
}

impl SupportSet for Hyperbox {
    fn dimension(&self) -> usize {
        self.min.len()
    }

    fn support_value(&self, direction: &[f64]) -> f64 {
        assert_eq!(
            direction.len(),
            self.min.len(),
            "Direction length must equal box dimension"
        );
        direction
            .iter()
            .enumerate()
            .map(|(i, &d)| if d >= 0.0 { d * self.max[i] } else { d * self.min[i] })
            .sum()
    }

    fn support_vector(&self, direction: &[f64]) -> Vec<f64> {
        assert_eq!(
            direction.len(),
            self.min.len(),
            "Direction length must equal box dimension"
        );
        direction
            .iter()
            .enumerate()
            .map(|(i, &d)| if d >= 0.0 { self.max[i] } else { self.min[i] })
            .collect()
    }
}

impl ConvexSet for Hyperbox {
    fn project(&self, vars: &[usize]) -> Self {
        for &v in vars {
            assert!(v < self.min.len(), "Projection variable out of range");
        }
        Self {
            min: vars.iter().map(|&v| self.min[v]).collect(),
            max: vars.iter().map(|&v| self.max[v]).collect(),
        }
    }

    /// The interval hull of the image: the tightest box enclosing `m · self`.
    fn linear_image(&self, m: &Matrix) -> Self {
        assert_eq!(
            m.cols(),
            self.min.len(),
            "Matrix columns must equal box dimension"
        );
        let mut min = Vec::with_capacity(m.rows());
        let mut max = Vec::with_capacity(m.rows());
        for i in 0..m.rows() {
            let row = m.row(i);
            max.push(self.support_value(row));
            let neg: Vec<f64> = row.iter().map(|x| -x).collect();
            min.push(-self.support_value(&neg));
        }
        Self { min, max }
    }

    fn with_time_axis(&self, span: TimeInterval) -> Self {
        let mut min = Vec::with_capacity(self.min.len() + 1);
        let mut max = Vec::with_capacity(self.max.len() + 1);
        min.push(span.lo());
        max.push(span.hi());
        min.extend_from_slice(&self.min);
        max.extend_from_slice(&self.max);
        Self { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let b = Hyperbox::new(vec![0.0, 0.0], vec![2.0, 4.0]);
        assert_eq!(b.dimension(), 2);
        assert_eq!(b.min(), &[0.0, 0.0]);
        assert_eq!(b.max(), &[2.0, 4.0]);
        assert_eq!(b.center(), vec![1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "Box minimum must not exceed maximum")]
    fn test_box_inverted_bounds() {
        Hyperbox::new(vec![1.0], vec![0.0]);
    }

    #[test]
    fn test_from_center_radius() {
        let b = Hyperbox::from_center_radius(&[1.0, -1.0], 0.5);
        assert_eq!(b.min(), &[0.5, -1.5]);
        assert_eq!(b.max(), &[1.5, -0.5]);
    }

    #[test]
    fn test_contains_point() {
        let b = Hyperbox::new(vec![0.0, 0.0], vec![1.0, 1.0]);
        assert!(b.contains_point(&[0.5, 0.5]));
        assert!(b.contains_point(&[0.0, 1.0]));
        assert!(!b.contains_point(&[1.5, 0.5]));
        assert!(!b.contains_point(&[0.5]));
    }

    #[test]
    fn test_intersects() {
        let a = Hyperbox::new(vec![0.0, 0.0], vec![1.0, 1.0]);
        let b = Hyperbox::new(vec![1.0, 1.0], vec![2.0, 2.0]);
        let c = Hyperbox::new(vec![3.0, 3.0], vec![4.0, 4.0]);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_expand() {
        let b = Hyperbox::new(vec![0.0], vec![1.0]).expand(0.5);
        assert_eq!(b.min(), &[-0.5]);
        assert_eq!(b.max(), &[1.5]);
    }

    #[test]
    fn test_support_value() {
        let b = Hyperbox::new(vec![-1.0, -2.0], vec![3.0, 4.0]);
        assert_eq!(b.support_value(&[1.0, 0.0]), 3.0);
        assert_eq!(b.support_value(&[-1.0, 0.0]), 1.0);
        assert_eq!(b.support_value(&[1.0, 1.0]), 7.0);
        assert_eq!(b.support_value(&[-1.0, -1.0]), 3.0);
    }

    #[test]
    fn test_support_vector() {
        let b = Hyperbox::new(vec![-1.0, -2.0], vec![3.0, 4.0]);
        assert_eq!(b.support_vector(&[1.0, -1.0]), vec![3.0, -2.0]);
    }

    #[test]
    fn test_project() {
        let b = Hyperbox::new(vec![0.0, 1.0, 2.0], vec![10.0, 11.0, 12.0]);
        let p = b.project(&[2, 0]);
        assert_eq!(p.min(), &[2.0, 0.0]);
        assert_eq!(p.max(), &[12.0, 10.0]);
    }

    #[test]
    fn test_linear_image_identity() {
        let b = Hyperbox::new(vec![-1.0, 0.0], vec![1.0, 2.0]);
        let img = b.linear_image(&Matrix::identity(2));
        assert_eq!(img, b);
    }

    #[test]
    fn test_linear_image_rotation_hull() {
        // Rotating the unit square by 90° maps [0,1]² to [-1,0]×[0,1];
        // the interval hull of an axis-aligned image is exact.
        let b = Hyperbox::new(vec![0.0, 0.0], vec![1.0, 1.0]);
        let rot = Matrix::new(2, 2, vec![0.0, -1.0, 1.0, 0.0]);
        let img = b.linear_image(&rot);
        assert_eq!(img.min(), &[-1.0, 0.0]);
        assert_eq!(img.max(), &[0.0, 1.0]);
    }

    #[test]
    fn test_with_time_axis() {
        let b = Hyperbox::new(vec![1.0], vec![2.0]);
        let stacked = b.with_time_axis(TimeInterval::new(0.0, 0.5));
        assert_eq!(stacked.dimension(), 2);
        assert_eq!(stacked.min(), &[0.0, 1.0]);
        assert_eq!(stacked.max(), &[0.5, 2.0]);
    }
}
