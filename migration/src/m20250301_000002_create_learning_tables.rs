use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_core_tables::{CourseModules, Courses, Enrollments, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 作业 ====================
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::ModuleId).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::MaxScore).double().not_null())
                    .col(ColumnDef::new(Assignments::DueAt).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::AllowLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::ModuleId)
                            .to(CourseModules::Table, CourseModules::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 评分量规 ====================
        manager
            .create_table(
                Table::create()
                    .table(Rubrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rubrics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Rubrics::AssignmentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Rubrics::Title).string().not_null())
                    .col(ColumnDef::new(Rubrics::Criteria).text().not_null())
                    .col(ColumnDef::new(Rubrics::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Rubrics::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Rubrics::Table, Rubrics::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 提交 ====================
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Content).text().not_null())
                    .col(ColumnDef::new(Submissions::AttachmentUrl).string().null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::IsLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Submissions::Score).double().null())
                    .col(
                        ColumnDef::new(Submissions::RevisionCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Submissions::StudentNote).text().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 提交评审 ====================
        manager
            .create_table(
                Table::create()
                    .table(SubmissionReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubmissionReviews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubmissionReviews::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionReviews::ReviewerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionReviews::Decision)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubmissionReviews::Score).double().null())
                    .col(
                        ColumnDef::new(SubmissionReviews::CriterionScores)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(SubmissionReviews::Comment).text().null())
                    .col(
                        ColumnDef::new(SubmissionReviews::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubmissionReviews::Table, SubmissionReviews::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubmissionReviews::Table, SubmissionReviews::ReviewerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 论坛 ====================
        manager
            .create_table(
                Table::create()
                    .table(ForumThreads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForumThreads::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::AuthorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ForumThreads::Title).string().not_null())
                    .col(ColumnDef::new(ForumThreads::Body).text().not_null())
                    .col(
                        ColumnDef::new(ForumThreads::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::IsLocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::ReplyCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::LastActivityAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ForumThreads::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ForumThreads::Table, ForumThreads::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ForumThreads::Table, ForumThreads::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ForumPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ForumPosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ForumPosts::ThreadId).big_integer().not_null())
                    .col(ColumnDef::new(ForumPosts::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(ForumPosts::Body).text().not_null())
                    .col(ColumnDef::new(ForumPosts::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ForumPosts::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ForumPosts::Table, ForumPosts::ThreadId)
                            .to(ForumThreads::Table, ForumThreads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ForumPosts::Table, ForumPosts::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 导师 ====================
        manager
            .create_table(
                Table::create()
                    .table(MentorProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MentorProfiles::Headline).string().not_null())
                    .col(ColumnDef::new(MentorProfiles::Bio).text().null())
                    .col(ColumnDef::new(MentorProfiles::Expertise).text().not_null())
                    .col(
                        ColumnDef::new(MentorProfiles::HourlyRateCents)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::MaxMentees)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::IsAccepting)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorProfiles::Table, MentorProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MentorshipRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorshipRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRequests::MentorProfileId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRequests::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorshipRequests::Message).text().null())
                    .col(
                        ColumnDef::new(MentorshipRequests::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRequests::ResponseNote)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRequests::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRequests::RespondedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                MentorshipRequests::Table,
                                MentorshipRequests::MentorProfileId,
                            )
                            .to(MentorProfiles::Table, MentorProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorshipRequests::Table, MentorshipRequests::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MentorshipSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorshipSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSessions::RequestId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSessions::MentorProfileId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSessions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSessions::StartsAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSessions::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorshipSessions::Topic).string().null())
                    .col(
                        ColumnDef::new(MentorshipSessions::MeetingUrl)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSessions::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorshipSessions::Notes).text().null())
                    .col(
                        ColumnDef::new(MentorshipSessions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipSessions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MentorshipSessions::Table, MentorshipSessions::RequestId)
                            .to(MentorshipRequests::Table, MentorshipRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 账单 ====================
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Payments::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::Currency).string().not_null())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(ColumnDef::new(Payments::ProviderRef).string().null())
                    .col(ColumnDef::new(Payments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Payments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 证书 ====================
        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certificates::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Certificates::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::EnrollmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::CredentialId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::VerificationUrl)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::VerificationCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Certificates::IssuedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Certificates::Table, Certificates::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Certificates::Table, Certificates::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Certificates::Table, Certificates::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_course_id")
                    .table(Assignments::Table)
                    .col(Assignments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uk_submissions_assignment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_forum_threads_course_id")
                    .table(ForumThreads::Table)
                    .col(ForumThreads::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_forum_posts_thread_id")
                    .table(ForumPosts::Table)
                    .col(ForumPosts::ThreadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mentorship_sessions_mentor_starts")
                    .table(MentorshipSessions::Table)
                    .col(MentorshipSessions::MentorProfileId)
                    .col(MentorshipSessions::StartsAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_user_course")
                    .table(Payments::Table)
                    .col(Payments::UserId)
                    .col(Payments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uk_certificates_user_course")
                    .table(Certificates::Table)
                    .col(Certificates::UserId)
                    .col(Certificates::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MentorshipSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MentorshipRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MentorProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ForumPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ForumThreads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubmissionReviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rubrics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    CourseId,
    ModuleId,
    CreatedBy,
    Title,
    Description,
    MaxScore,
    DueAt,
    AllowLate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Rubrics {
    #[sea_orm(iden = "rubrics")]
    Table,
    Id,
    AssignmentId,
    Title,
    Criteria,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    Content,
    AttachmentUrl,
    Status,
    IsLate,
    Score,
    RevisionCount,
    StudentNote,
    SubmittedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubmissionReviews {
    #[sea_orm(iden = "submission_reviews")]
    Table,
    Id,
    SubmissionId,
    ReviewerId,
    Decision,
    Score,
    CriterionScores,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ForumThreads {
    #[sea_orm(iden = "forum_threads")]
    Table,
    Id,
    CourseId,
    AuthorId,
    Title,
    Body,
    IsPinned,
    IsLocked,
    ReplyCount,
    LastActivityAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ForumPosts {
    #[sea_orm(iden = "forum_posts")]
    Table,
    Id,
    ThreadId,
    AuthorId,
    Body,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MentorProfiles {
    #[sea_orm(iden = "mentor_profiles")]
    Table,
    Id,
    UserId,
    Headline,
    Bio,
    Expertise,
    HourlyRateCents,
    MaxMentees,
    IsAccepting,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MentorshipRequests {
    #[sea_orm(iden = "mentorship_requests")]
    Table,
    Id,
    MentorProfileId,
    StudentId,
    Message,
    Status,
    ResponseNote,
    CreatedAt,
    RespondedAt,
}

#[derive(DeriveIden)]
enum MentorshipSessions {
    #[sea_orm(iden = "mentorship_sessions")]
    Table,
    Id,
    RequestId,
    MentorProfileId,
    StudentId,
    StartsAt,
    DurationMinutes,
    Topic,
    MeetingUrl,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    UserId,
    CourseId,
    AmountCents,
    Currency,
    Status,
    ProviderRef,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Certificates {
    #[sea_orm(iden = "certificates")]
    Table,
    Id,
    UserId,
    CourseId,
    EnrollmentId,
    CredentialId,
    VerificationUrl,
    VerificationCode,
    IssuedAt,
}
