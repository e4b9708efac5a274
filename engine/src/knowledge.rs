//! Folding knowledge from a lost round back into the dataset

use tracing::info;

use crate::dataset::{Dataset, Record};
use crate::error::Result;
use crate::storage::DatasetStore;

/// Record that `object` has every one of `characteristics`.
///
/// Unknown characteristics become new attribute columns, 0 for every existing
/// object. The object is created (0 everywhere else) if it is not known yet.
/// Values the object already has for other attributes are left alone.
pub fn absorb<S: AsRef<str>>(dataset: &mut Dataset, object: &str, characteristics: &[S]) {
    for characteristic in characteristics {
        if dataset.add_attribute(characteristic.as_ref()) {
            info!(attribute = characteristic.as_ref(), "Learned new attribute");
        }
    }

    if !dataset.contains(object) {
        info!(object, "Learned new object");
        dataset.insert(object, Record::new());
    }
    for characteristic in characteristics {
        dataset.set(object, characteristic.as_ref(), true);
    }
}

/// Load, [`absorb`], persist. Returns the dataset as written.
pub fn update<St, S>(store: &St, object: &str, characteristics: &[S]) -> Result<Dataset>
where
    St: DatasetStore + ?Sized,
    S: AsRef<str>,
{
    let mut dataset = store.load()?;
    absorb(&mut dataset, object, characteristics);
    store.persist(&dataset)?;
    Ok(dataset)
}
