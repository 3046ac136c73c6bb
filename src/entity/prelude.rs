//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::certificates::{
    ActiveModel as CertificateActiveModel, Entity as Certificates, Model as CertificateModel,
};
pub use super::course_modules::{
    ActiveModel as CourseModuleActiveModel, Entity as CourseModules, Model as CourseModuleModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::forum_posts::{
    ActiveModel as ForumPostActiveModel, Entity as ForumPosts, Model as ForumPostModel,
};
pub use super::forum_threads::{
    ActiveModel as ForumThreadActiveModel, Entity as ForumThreads, Model as ForumThreadModel,
};
pub use super::lesson_progress::{
    ActiveModel as LessonProgressActiveModel, Entity as LessonProgress,
    Model as LessonProgressModel,
};
pub use super::lessons::{ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel};
pub use super::mentor_profiles::{
    ActiveModel as MentorProfileActiveModel, Entity as MentorProfiles, Model as MentorProfileModel,
};
pub use super::mentorship_requests::{
    ActiveModel as MentorshipRequestActiveModel, Entity as MentorshipRequests,
    Model as MentorshipRequestModel,
};
pub use super::mentorship_sessions::{
    ActiveModel as MentorshipSessionActiveModel, Entity as MentorshipSessions,
    Model as MentorshipSessionModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::quiz_attempts::{
    ActiveModel as QuizAttemptActiveModel, Entity as QuizAttempts, Model as QuizAttemptModel,
};
pub use super::quizzes::{ActiveModel as QuizActiveModel, Entity as Quizzes, Model as QuizModel};
pub use super::rubrics::{ActiveModel as RubricActiveModel, Entity as Rubrics, Model as RubricModel};
pub use super::submission_reviews::{
    ActiveModel as SubmissionReviewActiveModel, Entity as SubmissionReviews,
    Model as SubmissionReviewModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
