use serde::{Deserialize, Serialize};

/// A dense row-major matrix representing a linear map.
///
/// This is the transform carried by lazy projection views: small (a handful
/// of output rows over the state dimension), applied either forward to
/// support points or through its transpose to support directions. It is not
/// a general linear-algebra type and deliberately stays a flat `Vec<f64>`.
///
/// # Examples
///
/// ```
/// use flowpipe_types::Matrix;
///
/// // Project a 3-dimensional state onto variables 0 and 2.
/// let m = Matrix::projection(3, &[0, 2]);
/// assert_eq!(m.apply(&[1.0, 2.0, 3.0]), vec![1.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "Matrix data length must equal rows * cols"
        );
        Self { rows, cols, data }
    }

    /// The `n`-dimensional identity map.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            rows: n,
            cols: n,
            data,
        }
    }

    /// The projection of a `dim`-dimensional state onto the listed variables,
    /// one output row per variable, in the listed order.
    pub fn projection(dim: usize, vars: &[usize]) -> Self {
        let mut data = vec![0.0; vars.len() * dim];
        for (row, &var) in vars.iter().enumerate() {
            assert!(var < dim, "Projection variable out of range for dimension");
            data[row * dim + var] = 1.0;
        }
        Self {
            rows: vars.len(),
            cols: dim,
            data,
        }
    }

    /// Number of rows (output dimension).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (input dimension).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "Matrix row index out of range");
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Apply the map to a vector: `M x`.
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.cols, "Vector length must equal matrix columns");
        (0..self.rows)
            .map(|i| self.row(i).iter().zip(x).map(|(a, b)| a * b).sum())
            .collect()
    }

    /// Apply the transpose to a vector: `Mᵀ d`.
    ///
    /// Used to rewrite a support direction in the image space as a direction
    /// in the source space: `h_{MS}(d) = h_S(Mᵀ d)`.
    pub fn transpose_apply(&self, d: &[f64]) -> Vec<f64> {
        assert_eq!(d.len(), self.rows, "Vector length must equal matrix rows");
        let mut out = vec![0.0; self.cols];
        for (i, &di) in d.iter().enumerate() {
            for (j, &mij) in self.row(i).iter().enumerate() {
                out[j] += mij * di;
            }
        }
        out
    }
}
