//! The two smoke scenarios run by the `social-sandbox` binary.

use std::fmt::Debug;

use crate::{BoxError, HarnessError, NewPost, TestContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// One `add_post`, checked on the returned post.
    SinglePost,
    /// Three sequential `add_post` calls, checked through `get_all_posts`.
    OrderedPosts,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::SinglePost, Scenario::OrderedPosts];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::SinglePost => "single_post",
            Scenario::OrderedPosts => "ordered_posts",
        }
    }

    pub async fn run(self, ctx: TestContext) -> Result<(), BoxError> {
        match self {
            Scenario::SinglePost => single_post(ctx).await,
            Scenario::OrderedPosts => ordered_posts(ctx).await,
        }
    }
}

async fn single_post(ctx: TestContext) -> Result<(), BoxError> {
    let post = ctx
        .social()
        .add_post(&ctx.root, &NewPost::new("Test").tags(["tag1", "tag2", "tag3"]))
        .await?;

    check_eq("title", &post.title, &"Test".to_string())?;
    check_eq("third tag", &post.tags.get(2).cloned(), &Some("tag3".to_string()))?;
    Ok(())
}

async fn ordered_posts(ctx: TestContext) -> Result<(), BoxError> {
    let social = ctx.social();
    for i in 0..3 {
        social
            .add_post(
                &ctx.root,
                &NewPost::new(format!("Test{i}"))
                    .description(format!("Test Description{i}"))
                    .tags([format!("tag{i}"), format!("shared{i}")]),
            )
            .await?;
    }

    let posts = social.get_all_posts().await?;

    check_eq("post count", &posts.len(), &3)?;
    check_eq("second title", &posts[1].1.title, &"Test1".to_string())?;
    check_eq(
        "third description",
        &posts[2].1.description,
        &"Test Description2".to_string(),
    )?;
    Ok(())
}

/// Equality check that reports a [`HarnessError::Mismatch`] instead of panicking.
pub fn check_eq<T: PartialEq + Debug>(what: &str, actual: &T, expected: &T) -> Result<(), HarnessError> {
    if actual == expected {
        return Ok(());
    }
    Err(HarnessError::Mismatch {
        what: what.to_string(),
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    })
}
