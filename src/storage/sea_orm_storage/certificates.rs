//! 证书存储操作

use super::notifications::insert_notification;
use super::{SeaOrmStorage, db_err};
use crate::entity::certificates::{ActiveModel, Column, Entity as Certificates};
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::users::Entity as Users;
use crate::errors::{CourseHubError, Result};
use crate::models::{
    certificates::entities::{Certificate, CertificateVerification, NewCertificate},
    enrollments::entities::EnrollmentStatus,
    notifications::entities::{NewNotification, NotificationType},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn get_certificate_for_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Certificate>> {
        let result = Certificates::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query certificate"))?;

        Ok(result.map(|m| m.into_certificate()))
    }

    /// 颁发证书
    ///
    /// 写入证书、将选课标记为已结业、发送通知，三步在同一事务内完成。
    pub async fn issue_certificate_impl(&self, certificate: NewCertificate) -> Result<Certificate> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let existing = Certificates::find()
            .filter(Column::UserId.eq(certificate.user_id))
            .filter(Column::CourseId.eq(certificate.course_id))
            .one(&txn)
            .await
            .map_err(db_err("Failed to query certificate"))?;
        if existing.is_some() {
            return Err(CourseHubError::conflict(
                "Certificate has already been issued for this course",
            ));
        }

        let enrollment = Enrollments::find_by_id(certificate.enrollment_id)
            .filter(EnrollmentColumn::UserId.eq(certificate.user_id))
            .one(&txn)
            .await
            .map_err(db_err("Failed to query enrollment"))?
            .ok_or_else(|| CourseHubError::not_found("Enrollment not found"))?;

        let now = chrono::Utc::now().timestamp();
        let course_id = certificate.course_id;

        let result = ActiveModel {
            user_id: Set(certificate.user_id),
            course_id: Set(certificate.course_id),
            enrollment_id: Set(certificate.enrollment_id),
            credential_id: Set(certificate.credential_id),
            verification_url: Set(certificate.verification_url),
            verification_code: Set(certificate.verification_code),
            issued_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            let err = db_err("Failed to create certificate")(e);
            if err.is_unique_violation() {
                CourseHubError::conflict("Certificate has already been issued for this course")
            } else {
                err
            }
        })?;

        EnrollmentActiveModel {
            id: Set(enrollment.id),
            status: Set(EnrollmentStatus::Completed.to_string()),
            completed_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_err("Failed to complete enrollment"))?;

        insert_notification(
            &txn,
            NewNotification::new(
                certificate.user_id,
                NotificationType::Certificate,
                "Certificate issued",
            )
            .content(format!(
                "Your certificate is ready. Verification code: {}",
                result.verification_code
            ))
            .reference("course", course_id),
        )
        .await?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit certificate"))?;

        Ok(result.into_certificate())
    }

    pub async fn list_user_certificates_impl(&self, user_id: i64) -> Result<Vec<Certificate>> {
        let result = Certificates::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::IssuedAt)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list certificates"))?;

        Ok(result.into_iter().map(|m| m.into_certificate()).collect())
    }

    /// 公开验证：按验证码查找证书，附带课程名和获得者姓名
    pub async fn get_certificate_verification_impl(
        &self,
        verification_code: &str,
    ) -> Result<Option<CertificateVerification>> {
        let Some(cert) = Certificates::find()
            .filter(Column::VerificationCode.eq(verification_code))
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query certificate"))?
        else {
            return Ok(None);
        };

        let course_title = Courses::find_by_id(cert.course_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query course"))?
            .map(|c| c.title)
            .unwrap_or_default();

        let recipient_name = Users::find_by_id(cert.user_id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query user"))?
            .map(|u| u.display_name.unwrap_or(u.username))
            .unwrap_or_default();

        let cert = cert.into_certificate();
        Ok(Some(CertificateVerification {
            valid: true,
            verification_code: cert.verification_code,
            credential_id: cert.credential_id,
            verification_url: cert.verification_url,
            course_title,
            recipient_name,
            issued_at: cert.issued_at,
        }))
    }
}
