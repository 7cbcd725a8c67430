use near_sdk::{
    env, json_types::U128, log, near,
    store::{IterableMap, LookupMap},
    AccountId, BorshStorageKey,
};

mod helpers;
mod views;

#[cfg(test)]
mod unit_tests;

pub const NO_POST_FOUND: &str = "No post found at that ID";

#[near(contract_state)]
pub struct Contract {
    pub posts: IterableMap<u128, Post>,
    pub number_of_posts: u128,
    pub likes_by_user_id: LookupMap<AccountId, Vec<Post>>,
    pub posts_by_tag: LookupMap<String, Vec<Post>>,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    pub id: U128,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub media: String,
    pub users_who_liked: Vec<AccountId>,
    pub owner_id: AccountId,
}

#[derive(BorshStorageKey)]
#[near]
pub enum StorageKey {
    Posts,
    LikesByUserId,
    PostsByTag,
}

impl Default for Contract {
    fn default() -> Self {
        Self {
            posts: IterableMap::new(StorageKey::Posts),
            number_of_posts: 0,
            likes_by_user_id: LookupMap::new(StorageKey::LikesByUserId),
            posts_by_tag: LookupMap::new(StorageKey::PostsByTag),
        }
    }
}

#[near]
impl Contract {
    // Create a post owned by the signer, tags are passed comma separated
    pub fn add_post(
        &mut self,
        title: String,
        description: String,
        tags: String,
        media: String,
    ) -> Post {
        let tags: Vec<String> = tags.split(',').map(str::to_string).collect();

        let post = Post {
            id: U128(self.number_of_posts),
            title,
            description,
            tags,
            media,
            users_who_liked: Vec::new(),
            owner_id: env::signer_account_id(),
        };

        self.number_of_posts += 1;
        self.posts.insert(post.id.0, post.clone());
        self.index_post_by_tags(&post);

        log!("Post {} added by {}", post.id.0, post.owner_id);
        post
    }

    // Like a post as the signer, unknown ids get a placeholder post back
    pub fn like_a_post(&mut self, post_id: U128) -> Post {
        let signer = env::signer_account_id();

        let Some(post) = self.posts.get_mut(&post_id.0) else {
            return Post {
                id: post_id,
                title: NO_POST_FOUND.to_string(),
                description: NO_POST_FOUND.to_string(),
                tags: Vec::new(),
                media: NO_POST_FOUND.to_string(),
                users_who_liked: Vec::new(),
                owner_id: signer,
            };
        };

        post.users_who_liked.push(signer.clone());
        let liked = post.clone();

        self.record_like(signer, &liked);
        liked
    }
}
