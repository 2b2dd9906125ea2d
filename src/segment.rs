use crate::OperationError;

/// An ordered, possibly-empty sequence of labels with an absolute/relative flag.
///
/// `Segments` is the hierarchical model shared by [`Host`] (labels separated
/// by `.`) and [`Path`] (segments separated by `/`). It is delimiter-agnostic:
/// labels are stored delimiter-free, and [`to_delimited`] re-joins them on
/// demand.
///
/// Every structural operation is pure and returns a new collection. Two
/// collections compare equal when their labels and flag are equal; callers
/// may rely on value equality, not identity, for idempotence checks.
///
/// [`Host`]: crate::Host
/// [`Path`]: crate::Path
/// [`to_delimited`]: Self::to_delimited
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Segments {
    labels: Vec<String>,
    absolute: bool,
}

impl Segments {
    /// Creates a collection from a sequence of labels.
    pub fn from_labels<I>(labels: I, absolute: bool) -> Segments
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Segments {
            labels: labels.into_iter().map(Into::into).collect(),
            absolute,
        }
    }

    /// Splits a raw delimited string into a collection.
    ///
    /// A leading delimiter marks the collection absolute and is stripped
    /// before splitting. A trailing delimiter yields one synthetic empty
    /// trailing label; it is never silently dropped. The empty string yields
    /// an empty relative collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::Segments;
    ///
    /// let s = Segments::from_delimited("/a/b/", '/');
    /// assert!(s.is_absolute());
    /// assert!(s.iter().eq(["a", "b", ""]));
    ///
    /// assert!(Segments::from_delimited("", '/').is_empty());
    /// ```
    #[must_use]
    pub fn from_delimited(s: &str, delimiter: char) -> Segments {
        if s.is_empty() {
            return Segments::default();
        }
        let (rest, absolute) = match s.strip_prefix(delimiter) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        Segments {
            labels: rest.split(delimiter).map(str::to_owned).collect(),
            absolute,
        }
    }

    /// Returns the number of labels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the collection has no labels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns `true` if a leading delimiter was present.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns the label at the given offset.
    #[inline]
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&str> {
        self.labels.get(offset).map(String::as_str)
    }

    /// Returns an iterator over the labels.
    pub fn iter(&self) -> impl Iterator<Item = &str> + DoubleEndedIterator + ExactSizeIterator {
        self.labels.iter().map(String::as_str)
    }

    /// Returns the same labels with the absolute flag set as given.
    #[must_use]
    pub fn with_absolute(&self, absolute: bool) -> Segments {
        Segments {
            labels: self.labels.clone(),
            absolute,
        }
    }

    /// Joins the labels with the given delimiter, prefixing it when absolute.
    #[must_use]
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut out = String::new();
        if self.absolute {
            out.push(delimiter);
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i != 0 {
                out.push(delimiter);
            }
            out.push_str(label);
        }
        out
    }

    fn spliced(&self, at: usize, remove: usize, other: &Segments) -> Segments {
        let mut labels = Vec::with_capacity(self.labels.len() - remove + other.labels.len());
        labels.extend_from_slice(&self.labels[..at]);
        labels.extend_from_slice(&other.labels);
        labels.extend_from_slice(&self.labels[at + remove..]);
        Segments {
            labels,
            absolute: self.absolute,
        }
    }

    /// Returns the offset just past the `occurrence`-th match of `anchor`,
    /// or `None` if there is no such match.
    fn find(&self, anchor: &str, occurrence: usize) -> Option<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| *label == anchor)
            .map(|(i, _)| i)
            .nth(occurrence)
    }

    /// Appends another collection's labels at the end.
    #[must_use]
    pub fn append(&self, other: &Segments) -> Segments {
        self.spliced(self.labels.len(), 0, other)
    }

    /// Inserts another collection's labels after the `occurrence`-th match
    /// (0-indexed) of `anchor`.
    ///
    /// Anchor-based insertion is advisory: when the anchor is not found, the
    /// original collection is returned unchanged. This is a deliberate no-op,
    /// not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::Segments;
    ///
    /// let s = Segments::from_delimited("a/b/a", '/');
    /// let x = Segments::from_delimited("x", '/');
    ///
    /// assert_eq!(s.append_after(&x, "a", 1).to_delimited('/'), "a/b/a/x");
    /// // Missing anchor: silent no-op.
    /// assert_eq!(s.append_after(&x, "z", 0), s);
    /// ```
    #[must_use]
    pub fn append_after(&self, other: &Segments, anchor: &str, occurrence: usize) -> Segments {
        match self.find(anchor, occurrence) {
            Some(i) => self.spliced(i + 1, 0, other),
            None => self.clone(),
        }
    }

    /// Prepends another collection's labels at the start.
    #[must_use]
    pub fn prepend(&self, other: &Segments) -> Segments {
        self.spliced(0, 0, other)
    }

    /// Inserts another collection's labels before the `occurrence`-th match
    /// (0-indexed) of `anchor`.
    ///
    /// As with [`append_after`], a missing anchor is a silent no-op.
    ///
    /// [`append_after`]: Self::append_after
    #[must_use]
    pub fn prepend_before(&self, other: &Segments, anchor: &str, occurrence: usize) -> Segments {
        match self.find(anchor, occurrence) {
            Some(i) => self.spliced(i, 0, other),
            None => self.clone(),
        }
    }

    /// Replaces the label at `offset` with another collection's labels.
    ///
    /// Unlike anchor-based insertion, an explicit offset is a precondition.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::OutOfRange`] if `offset` is outside `[0, len)`.
    pub fn replace(&self, offset: usize, other: &Segments) -> Result<Segments, OperationError> {
        if offset >= self.labels.len() {
            return Err(OperationError::OutOfRange {
                offset,
                len: self.labels.len(),
            });
        }
        Ok(self.spliced(offset, 1, other))
    }

    /// Removes the labels at the given offsets.
    ///
    /// Unknown offsets are ignored.
    #[must_use]
    pub fn without_offsets(&self, offsets: &[usize]) -> Segments {
        self.retain(|i, _| !offsets.contains(&i))
    }

    /// Removes the labels matching the predicate over `(offset, label)`.
    #[must_use]
    pub fn without<F>(&self, mut pred: F) -> Segments
    where
        F: FnMut(usize, &str) -> bool,
    {
        self.retain(|i, label| !pred(i, label))
    }

    /// Keeps only the labels matching the predicate over `(offset, label)`.
    #[must_use]
    pub fn retain<F>(&self, mut pred: F) -> Segments
    where
        F: FnMut(usize, &str) -> bool,
    {
        Segments {
            labels: self
                .labels
                .iter()
                .enumerate()
                .filter(|(i, label)| pred(*i, label))
                .map(|(_, label)| label.clone())
                .collect(),
            absolute: self.absolute,
        }
    }
}
