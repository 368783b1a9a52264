use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Insert<T> {
    type Output;
    async fn insert(&self, item: T) -> Result<Self::Output>;
}

/// Replace the stored item under `key`. Yields `None` when
/// no item with that key exists.
#[async_trait]
pub trait Update<T> {
    type Key;
    type Output;
    async fn update(&self, key: Self::Key, item: T) -> Result<Option<Self::Output>>;
}

#[async_trait]
pub trait Retrieve<T> {
    type Key;
    async fn retrieve(&self, key: Self::Key) -> Result<T>;
}

/// Remove the item under `key`. Returns whether anything
/// was removed.
#[async_trait]
pub trait Delete<T> {
    type Key;
    async fn delete(&self, key: Self::Key) -> Result<bool>;
}

#[async_trait]
pub trait Recent<T> {
    async fn recent(&self, limit: u32) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Summarize<T> {
    type Summary;
    async fn summarize(&self) -> Result<Self::Summary>;
}
