//! Built-in sample corpus for demos and smoke tests.

/// One sample document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub source: &'static str,
    pub text: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        source: "sample/rag-overview",
        text: "Retrieval-Augmented Generation (RAG) combines a retrieval system with a \
               generative language model. When a user asks a question, the system first \
               searches a knowledge base for relevant documents, then provides those \
               documents as context to the language model for answer generation. This \
               approach grounds the model's output in real data, significantly reducing \
               hallucination compared to pure generation.",
    },
    Sample {
        source: "sample/vector-databases",
        text: "Vector databases store data as high-dimensional vectors (embeddings). \
               They enable similarity search by computing distances (cosine, Euclidean, \
               dot product) between a query vector and stored vectors. Popular vector \
               databases include pgvector (PostgreSQL extension), Pinecone, Weaviate, \
               and Qdrant. pgvector is notable for integrating vector search directly \
               into PostgreSQL, allowing hybrid queries that combine SQL filters with \
               vector similarity.",
    },
    Sample {
        source: "sample/text-chunking",
        text: "Text chunking is the process of splitting large documents into smaller, \
               semantically meaningful pieces for embedding and retrieval. Common \
               strategies include fixed-size chunking with overlap, sentence-based \
               splitting, and recursive character splitting. The chunk size affects \
               retrieval precision: smaller chunks are more precise but may lose context, \
               while larger chunks preserve context but may introduce noise.",
    },
    Sample {
        source: "sample/hybrid-retrieval",
        text: "Hybrid retrieval combines keyword-based search (like BM25 or SQL ILIKE) \
               with dense vector similarity search. The results from both methods are \
               merged using techniques such as Reciprocal Rank Fusion (RRF). Hybrid \
               retrieval outperforms either method alone because keyword search excels \
               at exact term matching while vector search captures semantic similarity.",
    },
];
