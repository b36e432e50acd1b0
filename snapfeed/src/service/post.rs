use crate::{
    context::AuthenticatedScope,
    model::{NewPost, NewPostImage, PostDetails, PostDetailsRow, PostImageRow, PostRow, ProfileRow},
};
use serde::Serialize;
use snapfeed_error::{bail, Error, ErrorType, Result, ResultExt};
use snapfeed_supabase::Client as SupabaseClient;
use typed_builder::TypedBuilder;

const POSTS_TABLE: &str = "posts";
const POST_IMAGES_TABLE: &str = "post_images";
const PROFILES_TABLE: &str = "profiles";
const LIST_POSTS_FUNCTION: &str = "get_posts_with_details";

#[derive(Serialize)]
struct NoParams {}

#[derive(Clone, TypedBuilder)]
pub struct CreatePost {
    /// Text of the post
    #[builder(setter(into))]
    content: String,

    /// URLs of the attached images, in display order
    ///
    /// Must contain at least one URL.
    image_urls: Vec<String>,
}

#[derive(Clone, TypedBuilder)]
pub struct PostService {
    client: SupabaseClient,
}

impl PostService {
    /// All posts, newest first
    #[instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<PostDetails>> {
        let rows: Vec<PostDetailsRow> = self
            .client
            .rpc(LIST_POSTS_FUNCTION, &NoParams {})?
            .execute()
            .await?;

        let mut posts: Vec<PostDetails> = rows.into_iter().map(PostDetails::from).collect();
        posts.sort_by(|lhs, rhs| {
            rhs.post
                .created_at
                .cmp(&lhs.post.created_at)
                .then(rhs.post.id.cmp(&lhs.post.id))
        });

        Ok(posts)
    }

    /// Create a post on behalf of the scope's user
    ///
    /// The post row is written first, its images second. A failure in between leaves the post without images.
    #[instrument(skip_all, fields(user_id = %scope.user().id))]
    pub async fn create(
        &self,
        scope: &AuthenticatedScope<'_>,
        create_post: CreatePost,
    ) -> Result<PostDetails> {
        if create_post.image_urls.is_empty() {
            bail!(
                type = ErrorType::BadRequest(None),
                "A post needs at least one image"
            );
        }

        let client = scope.client();
        let user_id = scope.user().id;

        let new_post = NewPost {
            user_id,
            content: &create_post.content,
        };
        let post: PostRow = client
            .from(POSTS_TABLE)
            .insert(&new_post)?
            .execute()
            .await
            .with_error_type(ErrorType::Other(Some("Failed to create post".into())))?
            .into_iter()
            .next()
            .ok_or_else(|| no_rows_written(POSTS_TABLE, "Failed to create post"))?;

        debug!(post_id = post.id, "inserted post");

        let new_images = create_post
            .image_urls
            .iter()
            .enumerate()
            .map(|(idx, image_url)| -> Result<NewPostImage<'_>> {
                Ok(NewPostImage {
                    post_id: post.id,
                    image_url,
                    order: i32::try_from(idx)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut images: Vec<PostImageRow> = client
            .from(POST_IMAGES_TABLE)
            .insert(&new_images)?
            .execute()
            .await
            .with_error_type(ErrorType::Other(Some(
                "Failed to attach images to post".into(),
            )))?;
        if images.is_empty() {
            return Err(no_rows_written(
                POST_IMAGES_TABLE,
                "Failed to attach images to post",
            ));
        }
        images.sort_by_key(|image| image.order);

        let author = client
            .from(PROFILES_TABLE)
            .select("*")
            .eq("id", user_id)
            .limit(1)
            .execute::<ProfileRow>()
            .await?
            .into_iter()
            .next();

        Ok(PostDetails {
            post,
            images,
            author,
        })
    }
}

fn no_rows_written(table: &str, message: &str) -> Error {
    Error::msg(format!("insert into {table} returned no rows"))
        .with_error_type(ErrorType::Other(Some(message.into())))
}
