//! Typed client for the social posts contract.
//!
//! Each contract method gets a declared argument and result schema here, so a
//! renamed field shows up as a [`HarnessError::Decode`] instead of a `null`
//! somewhere deep in an assertion.

use near_api::AccountId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::{AccountHandle, ContractHandle, HarnessError};

pub const ADD_POST: &str = "add_post";
pub const GET_ALL_POSTS: &str = "get_all_posts";
pub const LIKE_A_POST: &str = "like_a_post";
pub const GET_LIKED_POSTS: &str = "get_liked_posts";
pub const GET_POSTS_BY_TAG: &str = "get_posts_by_tag";

/// Title, description and media of the post `like_a_post` returns for an unknown id.
pub const NO_POST_FOUND: &str = "No post found at that ID";

/// Post ids travel as decimal strings.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(#[serde_as(as = "DisplayFromStr")] pub u128);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub media: String,
    pub users_who_liked: Vec<AccountId>,
    pub owner_id: AccountId,
}

/// Arguments of `add_post`. Tags are sent comma separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub media: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .map(|tag| tag.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self
    }

    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct SocialClient {
    contract: ContractHandle,
}

impl SocialClient {
    pub fn new(contract: ContractHandle) -> Self {
        Self { contract }
    }

    pub async fn add_post(&self, caller: &AccountHandle, post: &NewPost) -> Result<Post, HarnessError> {
        self.contract.call(caller, ADD_POST, post).await
    }

    /// All posts paired with their ids, in the order the contract stored them.
    pub async fn get_all_posts(&self) -> Result<Vec<(PostId, Post)>, HarnessError> {
        self.contract.view(GET_ALL_POSTS, json!({})).await
    }

    pub async fn like_a_post(&self, caller: &AccountHandle, post_id: PostId) -> Result<Post, HarnessError> {
        self.contract
            .call(caller, LIKE_A_POST, json!({ "post_id": post_id }))
            .await
    }

    /// The contract keys likes by signer, which a view does not have, so this is
    /// sent as a signed call.
    pub async fn get_liked_posts(&self, caller: &AccountHandle) -> Result<Vec<Post>, HarnessError> {
        self.contract.call(caller, GET_LIKED_POSTS, json!({})).await
    }

    pub async fn get_posts_by_tag(&self, tag: &str) -> Result<Vec<Post>, HarnessError> {
        self.contract
            .view(GET_POSTS_BY_TAG, json!({ "tag": tag }))
            .await
    }
}
