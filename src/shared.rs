use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Séquence immuable partagée entre requêtes (catalogue des démarches)
/// sans recopier les données. Clone effectue simplement un `Arc::clone`.
#[derive(Debug)]
pub struct SharedSlice<T>(Arc<[T]>);

impl<T> Clone for SharedSlice<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> SharedSlice<T> {
    /// Construit une instance à partir d'un vecteur possédé (sans copie des éléments).
    pub fn from_vec(vec: Vec<T>) -> Self {
        Self(vec.into())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Vrai si les deux instances partagent le même stockage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: PartialEq> PartialEq for SharedSlice<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> Deref for SharedSlice<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Serialize> Serialize for SharedSlice<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
