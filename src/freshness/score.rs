//! Composite staleness score and ranking.
//!
//! Lower scores are fresher. A project pays [`MISSING_DIMENSION_PENALTY`] for
//! each of source code, blog and wiki it lacks, plus the age of its most
//! recent activity. The penalty dwarfs any realistic age, so completeness
//! always dominates recency.

use tracing::debug;

use super::RenderPass;
use crate::constants::MISSING_DIMENSION_PENALTY;
use crate::core::MonitorResult;
use crate::feed::HttpFetch;
use crate::roster::ProjectRecord;

/// A project paired with its score.
#[derive(Debug, Clone)]
pub struct RankedProject<'p> {
    /// The roster record
    pub project: &'p ProjectRecord,
    /// Composite staleness score
    pub score: f64,
}

impl<F: HttpFetch + Sync> RenderPass<'_, F> {
    /// Compute the staleness score of one project.
    ///
    /// With both a repository and a blog, the fresher of the two counts.
    /// Repository age is resolved first, so an unsupported repository type
    /// fails before the blog is fetched.
    pub async fn score_project(&mut self, project: &ProjectRecord) -> MonitorResult<f64> {
        let mut score = project.missing_dimensions() as f64 * MISSING_DIMENSION_PENALTY;

        match (&project.repo, &project.blog) {
            (Some(repo), Some(blog)) => {
                let repo_age = self.repo_age(repo).await?;
                let blog_age = self.blog_age(blog).await?;
                score += repo_age.min(blog_age);
            }
            (Some(repo), None) => score += self.repo_age(repo).await?,
            (None, Some(blog)) => score += self.blog_age(blog).await?,
            (None, None) => {}
        }

        debug!("Scored {}: {:.2}", project.name, score);
        Ok(score)
    }

    /// Score every project in roster order, then sort ascending.
    ///
    /// The sort is stable: projects with equal scores keep their roster order.
    pub async fn rank_projects<'p>(
        &mut self,
        projects: &'p [ProjectRecord],
    ) -> MonitorResult<Vec<RankedProject<'p>>> {
        let mut ranked = Vec::with_capacity(projects.len());
        for project in projects {
            let score = self.score_project(project).await?;
            ranked.push(RankedProject {
                project,
                score,
            });
        }

        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
        Ok(ranked)
    }
}
