//! Exact flat index with squared-L2 distance

use crate::{Error, Result};

/// One search result: an id and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: u64,
    pub distance: f32,
}

/// Exact, row-major flat index.
///
/// Every search compares the query against every stored row.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dim: usize,
    ids: Vec<u64>,
    vecs: Vec<f32>, // concatenated rows of length `dim`
}

impl FlatIndex {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ids: Vec::new(),
            vecs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    fn check_dim(&self, v: &[f32]) -> Result<()> {
        if v.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                actual: v.len(),
            });
        }
        Ok(())
    }

    #[inline]
    fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.vecs[start..start + self.dim]
    }

    /// Append a vector under `id`.
    pub fn add(&mut self, id: u64, v: &[f32]) -> Result<()> {
        self.check_dim(v)?;
        self.ids.push(id);
        self.vecs.extend_from_slice(v);
        Ok(())
    }

    /// Remove the vector stored under `id`. Returns whether one was present.
    pub fn remove(&mut self, id: u64) -> bool {
        let Some(pos) = self.ids.iter().position(|stored| *stored == id) else {
            return false;
        };
        self.ids.remove(pos);
        let start = pos * self.dim;
        self.vecs.drain(start..start + self.dim);
        true
    }

    /// The `k` nearest rows, closest first. Equal distances order by id.
    pub fn search(&self, q: &[f32], k: usize) -> Result<Vec<Hit>> {
        self.check_dim(q)?;
        let mut hits: Vec<Hit> = (0..self.len())
            .map(|i| Hit {
                id: self.ids[i],
                distance: squared_l2(q, self.row(i)),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(k);
        Ok(hits)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
