//! Mock records a fresh session starts from.
//!
//! All data here is fictional. Records are written as JSON in the same shape
//! they are stored in, then decoded into the typed models.

use serde_json::{json, Value};

use crate::models::{Entity, EntityKind};

/// Decode the mock records for `T`.
pub fn mock_records<T: Entity>() -> serde_json::Result<Vec<T>> {
    serde_json::from_value(mock_json(T::KIND))
}

/// Mock records of one kind as a JSON array.
pub fn mock_json(kind: EntityKind) -> Value {
    match kind {
        EntityKind::Appointment => appointments(),
        EntityKind::Patient => patients(),
        EntityKind::Doctor => doctors(),
        EntityKind::Medication => medications(),
        EntityKind::Bed => beds(),
        EntityKind::MedicalRecord => medical_records(),
        EntityKind::Report => reports(),
        EntityKind::Schedule => schedule(),
        EntityKind::Invoice => invoices(),
    }
}

// ── Appointments ─────────────────────────────────────────────────────────────

fn appointments() -> Value {
    json!([
        {
            "id": "APT001",
            "patient_name": "John Smith",
            "patient_id": "P001",
            "doctor_name": "Dr. Sarah Johnson",
            "department": "Cardiology",
            "date": "2024-01-15",
            "time": "10:00 AM",
            "type": "consultation",
            "status": "scheduled",
            "notes": "Follow-up on blood pressure readings"
        },
        {
            "id": "APT002",
            "patient_name": "Emily Davis",
            "patient_id": "P002",
            "doctor_name": "Dr. Michael Chen",
            "department": "Neurology",
            "date": "2024-01-15",
            "time": "11:30 AM",
            "type": "follow-up",
            "status": "in-progress"
        },
        {
            "id": "APT003",
            "patient_name": "Robert Wilson",
            "patient_id": "P003",
            "doctor_name": "Dr. Lisa Anderson",
            "department": "Orthopedics",
            "date": "2024-01-16",
            "time": "02:00 PM",
            "type": "consultation",
            "status": "completed"
        },
        {
            "id": "APT004",
            "patient_name": "Maria Garcia",
            "patient_id": "P004",
            "doctor_name": "Dr. Sarah Johnson",
            "department": "Cardiology",
            "date": "2024-01-17",
            "time": "09:15 AM",
            "type": "emergency",
            "status": "cancelled",
            "notes": "Patient rescheduled by phone"
        }
    ])
}

// ── Patients ─────────────────────────────────────────────────────────────────

fn patients() -> Value {
    json!([
        {
            "id": "P001",
            "name": "John Smith",
            "age": 45,
            "gender": "male",
            "phone": "555-0101",
            "email": "john.smith@example.com",
            "address": "12 Elm Street",
            "blood_type": "A+",
            "condition": "Hypertension",
            "doctor_name": "Dr. Sarah Johnson",
            "admission_date": "2024-01-10",
            "status": "admitted",
            "medical_history": [
                {
                    "date": "2023-06-12",
                    "diagnosis": "Hypertension",
                    "treatment": "Lisinopril 10mg daily",
                    "doctor_name": "Dr. Sarah Johnson"
                }
            ]
        },
        {
            "id": "P002",
            "name": "Emily Davis",
            "age": 32,
            "gender": "female",
            "phone": "555-0102",
            "email": "emily.davis@example.com",
            "blood_type": "O-",
            "condition": "Migraine",
            "doctor_name": "Dr. Michael Chen",
            "status": "outpatient",
            "medical_history": []
        },
        {
            "id": "P003",
            "name": "Robert Wilson",
            "age": 67,
            "gender": "male",
            "phone": "555-0103",
            "blood_type": "B+",
            "condition": "Hip fracture",
            "doctor_name": "Dr. Lisa Anderson",
            "admission_date": "2024-01-12",
            "status": "critical",
            "medical_history": []
        },
        {
            "id": "P004",
            "name": "Maria Garcia",
            "age": 54,
            "gender": "female",
            "phone": "555-0104",
            "condition": "Arrhythmia",
            "doctor_name": "Dr. Sarah Johnson",
            "status": "discharged",
            "medical_history": []
        }
    ])
}

// ── Doctors ──────────────────────────────────────────────────────────────────

fn doctors() -> Value {
    json!([
        {
            "id": "D001",
            "name": "Dr. Sarah Johnson",
            "specialization": "Cardiologist",
            "department": "Cardiology",
            "phone": "555-0201",
            "email": "sarah.johnson@hospital.example",
            "experience_years": 15,
            "patient_count": 120,
            "status": "available"
        },
        {
            "id": "D002",
            "name": "Dr. Michael Chen",
            "specialization": "Neurologist",
            "department": "Neurology",
            "phone": "555-0202",
            "email": "michael.chen@hospital.example",
            "experience_years": 10,
            "patient_count": 85,
            "status": "busy"
        },
        {
            "id": "D003",
            "name": "Dr. Lisa Anderson",
            "specialization": "Orthopedic Surgeon",
            "department": "Orthopedics",
            "phone": "555-0203",
            "email": "lisa.anderson@hospital.example",
            "experience_years": 12,
            "patient_count": 64,
            "status": "on-leave"
        }
    ])
}

// ── Pharmacy ─────────────────────────────────────────────────────────────────

fn medications() -> Value {
    json!([
        {
            "id": "MED001",
            "name": "Amoxicillin",
            "category": "Antibiotic",
            "dosage": "500mg",
            "stock": 450,
            "unit_price_cents": 125,
            "manufacturer": "PharmaCorp",
            "expiry_date": "2025-06-30",
            "status": "in-stock"
        },
        {
            "id": "MED002",
            "name": "Lisinopril",
            "category": "Cardiovascular",
            "dosage": "10mg",
            "stock": 35,
            "unit_price_cents": 80,
            "manufacturer": "HeartMed",
            "expiry_date": "2025-03-31",
            "status": "low-stock"
        },
        {
            "id": "MED003",
            "name": "Ibuprofen",
            "category": "Analgesic",
            "dosage": "400mg",
            "stock": 0,
            "unit_price_cents": 45,
            "manufacturer": "PainAway",
            "expiry_date": "2024-12-31",
            "status": "out-of-stock"
        }
    ])
}

// ── Beds ─────────────────────────────────────────────────────────────────────

fn beds() -> Value {
    json!([
        {
            "id": "B001",
            "ward": "General",
            "room": "101",
            "type": "standard",
            "status": "occupied",
            "patient_name": "John Smith",
            "admitted_on": "2024-01-10"
        },
        {
            "id": "B002",
            "ward": "General",
            "room": "102",
            "type": "standard",
            "status": "available"
        },
        {
            "id": "B003",
            "ward": "ICU",
            "room": "201",
            "type": "icu",
            "status": "occupied",
            "patient_name": "Robert Wilson",
            "admitted_on": "2024-01-12"
        },
        {
            "id": "B004",
            "ward": "Maternity",
            "room": "301",
            "type": "private",
            "status": "maintenance"
        }
    ])
}

// ── Medical records ──────────────────────────────────────────────────────────

fn medical_records() -> Value {
    json!([
        {
            "id": "MR001",
            "patient_name": "John Smith",
            "patient_id": "P001",
            "type": "Lab Report",
            "date": "2024-01-10",
            "doctor_name": "Dr. Sarah Johnson",
            "department": "Cardiology",
            "diagnosis": "Elevated cholesterol",
            "status": "final",
            "attachments": [
                {
                    "file_name": "lipid-panel.pdf",
                    "content_type": "application/pdf",
                    "size_bytes": 184320,
                    "uploaded_on": "2024-01-10"
                }
            ]
        },
        {
            "id": "MR002",
            "patient_name": "Emily Davis",
            "patient_id": "P002",
            "type": "Imaging",
            "date": "2024-01-12",
            "doctor_name": "Dr. Michael Chen",
            "department": "Neurology",
            "diagnosis": "No abnormality detected",
            "notes": "MRI brain without contrast",
            "status": "reviewed",
            "attachments": []
        },
        {
            "id": "MR003",
            "patient_name": "Robert Wilson",
            "patient_id": "P003",
            "type": "Surgery Note",
            "date": "2024-01-13",
            "doctor_name": "Dr. Lisa Anderson",
            "department": "Orthopedics",
            "diagnosis": "Left hip fracture, fixated",
            "status": "pending",
            "attachments": []
        }
    ])
}

// ── Reports ──────────────────────────────────────────────────────────────────

fn reports() -> Value {
    json!([
        {
            "id": "R001",
            "title": "Monthly Patient Statistics",
            "category": "Patient",
            "author": "Admin",
            "date": "2024-01-31",
            "format": "PDF",
            "status": "generated"
        },
        {
            "id": "R002",
            "title": "Department Revenue Q4",
            "category": "Financial",
            "author": "Finance Team",
            "date": "2024-01-05",
            "format": "XLSX",
            "status": "archived"
        },
        {
            "id": "R003",
            "title": "Bed Occupancy Trends",
            "category": "Operations",
            "author": "Admin",
            "date": "2024-01-20",
            "format": "PDF",
            "status": "draft"
        }
    ])
}

// ── Schedule ─────────────────────────────────────────────────────────────────

fn schedule() -> Value {
    json!([
        {
            "id": "S001",
            "doctor_name": "Dr. Sarah Johnson",
            "department": "Cardiology",
            "date": "2024-01-15",
            "start_time": "08:00",
            "end_time": "16:00",
            "shift": "morning",
            "room": "C-12",
            "status": "scheduled"
        },
        {
            "id": "S002",
            "doctor_name": "Dr. Michael Chen",
            "department": "Neurology",
            "date": "2024-01-15",
            "start_time": "14:00",
            "end_time": "22:00",
            "shift": "afternoon",
            "room": "N-3",
            "status": "scheduled"
        },
        {
            "id": "S003",
            "doctor_name": "Dr. Lisa Anderson",
            "department": "Orthopedics",
            "date": "2024-01-14",
            "start_time": "22:00",
            "end_time": "23:59",
            "shift": "night",
            "room": "OR-2",
            "status": "completed"
        }
    ])
}

// ── Billing ──────────────────────────────────────────────────────────────────

fn invoices() -> Value {
    json!([
        {
            "id": "INV001",
            "patient_name": "John Smith",
            "issued_on": "2024-01-10",
            "due_on": "2024-02-09",
            "items": [
                { "description": "Consultation", "quantity": 1, "unit_price_cents": 15000 },
                { "description": "Lipid panel", "quantity": 1, "unit_price_cents": 8500 }
            ],
            "status": "paid"
        },
        {
            "id": "INV002",
            "patient_name": "Robert Wilson",
            "issued_on": "2024-01-13",
            "due_on": "2024-02-12",
            "items": [
                { "description": "Surgery", "quantity": 1, "unit_price_cents": 1250000 },
                { "description": "ICU night", "quantity": 3, "unit_price_cents": 180000 }
            ],
            "status": "pending"
        },
        {
            "id": "INV003",
            "patient_name": "Maria Garcia",
            "issued_on": "2023-11-20",
            "due_on": "2023-12-20",
            "items": [],
            "status": "overdue"
        }
    ])
}
