//! Item endpoints, written once over the two structurally parallel kinds.

use std::marker::PhantomData;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use lostfound_shared::item::handle::{FoundItemDescriptor, LostItemDescriptor};
use lostfound_shared::item::{FoundItem, ItemRecord, LostItem};

use crate::Error;

/// Endpoint wiring for one item kind. The two kinds differ only in paths and
/// record type; the board and fetch/delete requests are generic over this.
pub trait ItemKindSpec: Send + Sync + 'static {
    type Record: ItemRecord + Clone + PartialEq + DeserializeOwned + Send + Sync + 'static;

    /// Lowercase label for notices and logs ("lost" / "found").
    const LABEL: &'static str;

    fn list_path() -> &'static str;
    fn delete_path(id: u64) -> String;
}

pub enum LostKind {}

impl ItemKindSpec for LostKind {
    type Record = LostItem;
    const LABEL: &'static str = "lost";

    fn list_path() -> &'static str {
        "/lostItem/getAllLostItems"
    }

    fn delete_path(id: u64) -> String {
        format!("/lostItem/deleteLostItem/{id}")
    }
}

pub enum FoundKind {}

impl ItemKindSpec for FoundKind {
    type Record = FoundItem;
    const LABEL: &'static str = "found";

    fn list_path() -> &'static str {
        "/foundItems/getAll"
    }

    fn delete_path(id: u64) -> String {
        format!("/foundItems/deleteFoundItem/{id}")
    }
}

/// `GET` the full collection of one kind.
pub struct FetchItems<K: ItemKindSpec>(PhantomData<K>);

impl<K: ItemKindSpec> Default for FetchItems<K> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

#[async_trait::async_trait]
impl<K: ItemKindSpec> super::ApiRequest for FetchItems<K> {
    type Output = Vec<K::Record>;

    fn path(&self) -> String {
        K::list_path().to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json_body(response).await
    }
}

/// `DELETE` one item of one kind.
pub struct DeleteItem<K: ItemKindSpec> {
    pub id: u64,
    _kind: PhantomData<K>,
}

impl<K: ItemKindSpec> DeleteItem<K> {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<K: ItemKindSpec> super::ApiRequest for DeleteItem<K> {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::DELETE;

    fn path(&self) -> String {
        K::delete_path(self.id)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// Image bytes attached to a report. Upload only; storage and serving are
/// the backend's concern.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart form in the shape the backend expects: one JSON part named
/// after the item kind, plus the optional `imageFile` part.
fn item_form<D: Serialize>(
    json_part_name: &'static str,
    descriptor: &D,
    image: Option<&ImageUpload>,
) -> Result<Form, Error> {
    let json = serde_json::to_string(descriptor)?;
    let mut form = Form::new().part(
        json_part_name,
        Part::text(json).mime_str(mime::APPLICATION_JSON.as_ref())?,
    );
    if let Some(image) = image {
        form = form.part(
            "imageFile",
            Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)?,
        );
    }
    Ok(form)
}

/// `POST /lostItem/saveLostItem` (multipart). Lost items have no update
/// endpoint; edits re-submit through this one.
pub struct SaveLostItem {
    pub descriptor: LostItemDescriptor,
    pub image: Option<ImageUpload>,
}

#[async_trait::async_trait]
impl super::ApiRequest for SaveLostItem {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/lostItem/saveLostItem".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.multipart(item_form("lostItem", &self.descriptor, self.image.as_ref())?))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `POST /foundItems/saveFoundItem` (multipart).
pub struct SaveFoundItem {
    pub descriptor: FoundItemDescriptor,
    pub image: Option<ImageUpload>,
}

#[async_trait::async_trait]
impl super::ApiRequest for SaveFoundItem {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/foundItems/saveFoundItem".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.multipart(item_form("foundItem", &self.descriptor, self.image.as_ref())?))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `PUT /foundItems/updateFoundItem/{id}` (multipart).
pub struct UpdateFoundItem {
    pub id: u64,
    pub descriptor: FoundItemDescriptor,
    pub image: Option<ImageUpload>,
}

#[async_trait::async_trait]
impl super::ApiRequest for UpdateFoundItem {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::PUT;

    fn path(&self) -> String {
        format!("/foundItems/updateFoundItem/{}", self.id)
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.multipart(item_form("foundItem", &self.descriptor, self.image.as_ref())?))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}
