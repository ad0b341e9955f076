//! Scatter-gather view over a packet payload.

/// A payload spread over one or more contiguous views.
///
/// The network layer hands payloads over in this form so that headers stripped
/// from the front never require copying the rest of the packet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorisedView {
    views: Vec<Vec<u8>>,
    size: usize,
}

impl VectorisedView {
    /// Creates a view over `views`. Empty views are dropped.
    pub fn new(views: Vec<Vec<u8>>) -> Self {
        let views: Vec<Vec<u8>> = views.into_iter().filter(|v| !v.is_empty()).collect();
        let size = views.iter().map(Vec::len).sum();

        Self { views, size }
    }

    /// Total number of bytes across all views.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the payload holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The underlying views, in order.
    pub fn views(&self) -> &[Vec<u8>] {
        &self.views
    }

    /// The first view, if any.
    pub fn first(&self) -> Option<&[u8]> {
        self.views.first().map(Vec::as_slice)
    }

    /// Copies the payload into a single contiguous buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size);
        for view in &self.views {
            buf.extend_from_slice(view);
        }
        buf
    }

    /// Removes the first `count` bytes, e.g. an already processed header.
    pub fn trim_front(&mut self, mut count: usize) {
        count = count.min(self.size);
        self.size -= count;

        let mut drained = 0;
        for view in &mut self.views {
            if count < view.len() {
                view.drain(..count);
                break;
            }
            count -= view.len();
            drained += 1;
        }
        self.views.drain(..drained);
    }

    /// Truncates the payload to at most `length` bytes.
    pub fn cap_length(&mut self, length: usize) {
        if length >= self.size {
            return;
        }
        self.size = length;

        let mut remaining = length;
        let mut keep = 0;
        for view in &mut self.views {
            if remaining == 0 {
                break;
            }
            if view.len() > remaining {
                view.truncate(remaining);
            }
            remaining -= view.len();
            keep += 1;
        }
        self.views.truncate(keep);
    }
}

impl From<Vec<u8>> for VectorisedView {
    fn from(buf: Vec<u8>) -> Self {
        Self::new(vec![buf])
    }
}

impl From<&[u8]> for VectorisedView {
    fn from(buf: &[u8]) -> Self {
        Self::new(vec![buf.to_vec()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectorised_view_basic() {
        let vv = VectorisedView::new(vec![vec![1, 2], vec![], vec![3, 4, 5]]);
        assert_eq!(vv.size(), 5);
        assert_eq!(vv.views().len(), 2);
        assert_eq!(vv.first(), Some(&[1u8, 2][..]));
        assert_eq!(vv.to_vec(), vec![1, 2, 3, 4, 5]);
        assert!(VectorisedView::default().is_empty());
    }

    #[test]
    fn vectorised_view_trim_front_across_views() {
        let mut vv = VectorisedView::new(vec![vec![1, 2], vec![3, 4, 5]]);

        vv.trim_front(3);
        assert_eq!(vv.size(), 2);
        assert_eq!(vv.views(), &[vec![4, 5]]);

        vv.trim_front(10);
        assert!(vv.is_empty());
        assert!(vv.views().is_empty());
    }

    #[test]
    fn vectorised_view_cap_length() {
        let mut vv = VectorisedView::new(vec![vec![1, 2], vec![3, 4, 5]]);

        vv.cap_length(10);
        assert_eq!(vv.size(), 5);

        vv.cap_length(3);
        assert_eq!(vv.to_vec(), vec![1, 2, 3]);
        assert_eq!(vv.views().len(), 2);

        vv.cap_length(2);
        assert_eq!(vv.views(), &[vec![1, 2]]);
    }
}
