//! Dashboard statistics and the laggards report.

use serde::Serialize;
use std::collections::BTreeSet;

use super::RenderPass;
use crate::constants::{LAGGARD_THRESHOLD_DAYS, LAST_WEEK_DAYS, SENTINEL_AGE_DAYS};
use crate::core::MonitorResult;
use crate::feed::HttpFetch;
use crate::roster::ProjectRecord;

/// Roster-wide counts shown above the dashboard table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Projects in the roster
    pub num_projects: usize,
    /// Projects with no blog, wiki or source code
    pub none: usize,
    /// Projects with all of blog, wiki and source code
    pub all_three: usize,
    /// Projects with blog or repository activity in the last seven days
    pub last_week: usize,
    /// Distinct contributors across all projects
    pub members: usize,
}

impl<F: HttpFetch + Sync> RenderPass<'_, F> {
    /// Blog age, or the sentinel for projects without a blog.
    pub async fn project_blog_age(&mut self, project: &ProjectRecord) -> MonitorResult<f64> {
        match &project.blog {
            Some(blog) => self.blog_age(blog).await,
            None => Ok(SENTINEL_AGE_DAYS),
        }
    }

    /// Repository age, or the sentinel for projects without a repository.
    pub async fn project_source_age(&mut self, project: &ProjectRecord) -> MonitorResult<f64> {
        match &project.repo {
            Some(repo) => self.repo_age(repo).await,
            None => Ok(SENTINEL_AGE_DAYS),
        }
    }

    /// Compute the dashboard statistics for the roster.
    pub async fn dashboard_stats(&mut self, projects: &[ProjectRecord]) -> MonitorResult<DashboardStats> {
        let mut stats = DashboardStats {
            num_projects: projects.len(),
            ..DashboardStats::default()
        };
        let mut members = BTreeSet::new();

        for project in projects {
            match project.missing_dimensions() {
                0 => stats.all_three += 1,
                3 => stats.none += 1,
                _ => {}
            }

            let blog_age = self.project_blog_age(project).await?;
            let source_age = self.project_source_age(project).await?;
            if blog_age.min(source_age) < LAST_WEEK_DAYS {
                stats.last_week += 1;
            }

            if let Some(contributors) = &project.contributors {
                members.extend(contributors.names());
            }
        }

        stats.members = members.len();
        Ok(stats)
    }

    /// Projects whose blog or source code has been quiet for more than two weeks.
    ///
    /// Roster order is preserved.
    pub async fn laggards<'p>(&mut self, projects: &'p [ProjectRecord]) -> MonitorResult<Vec<&'p ProjectRecord>> {
        let threshold = f64::from(LAGGARD_THRESHOLD_DAYS);
        let mut laggards = Vec::new();
        for project in projects {
            let blog_age = self.project_blog_age(project).await?;
            let source_age = self.project_source_age(project).await?;
            if blog_age > threshold || source_age > threshold {
                laggards.push(project);
            }
        }
        Ok(laggards)
    }
}
