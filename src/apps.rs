//! Installed app enumeration.
//!
//! The app filesystem is an external collaborator; the launcher only needs
//! to walk its entries in order and read their display names.

/// Opaque handle of an installed app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppHandle(pub u32);

/// Ordered listing of installed apps.
pub trait AppCatalog {
    /// Entry following `after`, or the first entry for `None`.
    /// Returns `None` once the listing is exhausted.
    fn next_entry(&self, after: Option<AppHandle>) -> Option<AppHandle>;

    /// Display name of an entry.
    fn entry_name(&self, handle: AppHandle) -> &str;
}

/// Iterate over `(handle, name)` pairs of a catalog.
pub fn entries<C: AppCatalog + ?Sized>(catalog: &C) -> Entries<'_, C> {
    Entries {
        catalog,
        last: None,
        done: false,
    }
}

pub struct Entries<'a, C: ?Sized> {
    catalog: &'a C,
    last: Option<AppHandle>,
    done: bool,
}

impl<'a, C: AppCatalog + ?Sized> Iterator for Entries<'a, C> {
    type Item = (AppHandle, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.catalog.next_entry(self.last) {
            Some(handle) => {
                self.last = Some(handle);
                Some((handle, self.catalog.entry_name(handle)))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Catalog over a fixed list of names; handles are indices.
#[derive(Clone, Copy, Debug, Default)]
pub struct SliceCatalog<'a> {
    names: &'a [&'a str],
}

impl<'a> SliceCatalog<'a> {
    pub const fn new(names: &'a [&'a str]) -> Self {
        Self { names }
    }
}

impl AppCatalog for SliceCatalog<'_> {
    fn next_entry(&self, after: Option<AppHandle>) -> Option<AppHandle> {
        let next = after.map_or(0, |h| h.0 as usize + 1);
        (next < self.names.len()).then_some(AppHandle(next as u32))
    }

    fn entry_name(&self, handle: AppHandle) -> &str {
        self.names.get(handle.0 as usize).copied().unwrap_or("")
    }
}
