use crate::*;

#[near]
impl Contract {
    // Get every post with its id, in the order they were added
    pub fn get_all_posts(&self) -> Vec<(U128, Post)> {
        self.posts
            .iter()
            .map(|(id, post)| (U128(*id), post.clone()))
            .collect()
    }

    // Get the posts liked by the signer
    pub fn get_liked_posts(&self) -> Vec<Post> {
        self.likes_by_user_id
            .get(&env::signer_account_id())
            .cloned()
            .unwrap_or_else(|| env::panic_str("UNABLE_TO_FIND_USERS_LIKED_POSTS"))
    }

    // Get the posts carrying a tag, in the order they were added
    pub fn get_posts_by_tag(&self, tag: String) -> Vec<Post> {
        self.posts_by_tag
            .get(&tag)
            .cloned()
            .unwrap_or_else(|| env::panic_str("UNABLE_TO_FIND_POSTS"))
    }
}
